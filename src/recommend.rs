// 该文件是 Lumina （植光） 项目的一部分。
// src/recommend.rs - 补光设备推荐配置
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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::label::{GERMINATION, GROWING, HARVESTING};

/// 单个生长阶段的补光与温度设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
  pub light_color: String,
  pub light_intensity: String,
  pub temperature: String,
}

impl DeviceConfig {
  pub fn new(
    light_color: impl Into<String>,
    light_intensity: impl Into<String>,
    temperature: impl Into<String>,
  ) -> Self {
    Self {
      light_color: light_color.into(),
      light_intensity: light_intensity.into(),
      temperature: temperature.into(),
    }
  }
}

/// 植物品种 -> 生长阶段 -> 设备配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable {
  plants: BTreeMap<String, BTreeMap<String, DeviceConfig>>,
}

impl RecommendationTable {
  pub fn empty() -> Self {
    Self::default()
  }

  /// 内置的两种生菜配置
  pub fn builtin() -> Self {
    let mut table = Self::empty();

    let olmetie = "Olmetie Lettuce";
    table.insert(
      olmetie,
      GERMINATION,
      DeviceConfig::new("Blue", "5,000-10,000 lux", "16-20°C"),
    );
    table.insert(
      olmetie,
      GROWING,
      DeviceConfig::new("Red + Blue", "15,000-20,000 lux", "18-22°C"),
    );
    table.insert(
      olmetie,
      HARVESTING,
      DeviceConfig::new("Red + Blue", "15,000-20,000 lux", "18-22°C"),
    );

    let thurinus = "Thurinus Lettuce";
    table.insert(
      thurinus,
      GERMINATION,
      DeviceConfig::new("Blue", "5,000-8,000 lux", "15-19°C"),
    );
    table.insert(
      thurinus,
      GROWING,
      DeviceConfig::new("Red + Blue", "12,000-18,000 lux", "18-24°C"),
    );
    table.insert(
      thurinus,
      HARVESTING,
      DeviceConfig::new("Red + Blue", "12,000-18,000 lux", "18-24°C"),
    );

    table
  }

  pub fn insert(
    &mut self,
    plant: impl Into<String>,
    stage: impl Into<String>,
    config: DeviceConfig,
  ) -> Option<DeviceConfig> {
    self
      .plants
      .entry(plant.into())
      .or_default()
      .insert(stage.into(), config)
  }

  /// 任一键不存在时返回 `None`
  pub fn resolve(&self, plant: &str, stage: &str) -> Option<&DeviceConfig> {
    self.plants.get(plant)?.get(stage)
  }

  pub fn plants(&self) -> impl Iterator<Item = &str> {
    self.plants.keys().map(String::as_str)
  }
}
