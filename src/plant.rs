// 该文件是 Lumina （植光） 项目的一部分。
// src/plant.rs - 可选植物品种
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preprocess::Preprocess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
  #[serde(rename = "Olmetie Lettuce")]
  OlmetieLettuce,
  #[serde(rename = "Thurinus Lettuce")]
  ThurinusLettuce,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("未知的植物品种: {0}")]
pub struct UnknownPlantType(pub String);

impl PlantType {
  pub const ALL: [PlantType; 2] = [PlantType::OlmetieLettuce, PlantType::ThurinusLettuce];

  /// 界面显示名称，同时也是推荐表的一级键
  pub fn as_str(&self) -> &'static str {
    match self {
      PlantType::OlmetieLettuce => "Olmetie Lettuce",
      PlantType::ThurinusLettuce => "Thurinus Lettuce",
    }
  }

  pub fn slug(&self) -> &'static str {
    match self {
      PlantType::OlmetieLettuce => "olmetie-lettuce",
      PlantType::ThurinusLettuce => "thurinus-lettuce",
    }
  }

  /// Thurinus 品种需要先染绿再推理
  pub fn preprocess(&self) -> Preprocess {
    match self {
      PlantType::ThurinusLettuce => Preprocess::green_hue(),
      PlantType::OlmetieLettuce => Preprocess::Identity,
    }
  }
}

impl fmt::Display for PlantType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for PlantType {
  type Err = UnknownPlantType;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim();
    PlantType::ALL
      .into_iter()
      .find(|plant| {
        plant.as_str().eq_ignore_ascii_case(needle) || plant.slug().eq_ignore_ascii_case(needle)
      })
      .ok_or_else(|| UnknownPlantType(s.to_string()))
  }
}
