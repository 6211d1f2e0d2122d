// 该文件是 Lumina （植光） 项目的一部分。
// src/model.rs - 检测模型接口
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::collections::BTreeMap;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// 目标检测模型。实现方负责加载与推理，本库只消费其输出。
pub trait Detector {
  type Error;

  /// 返回置信度不低于 `confidence` 的检测结果，顺序由模型决定
  fn detect(&self, image: &RgbImage, confidence: f32) -> Result<DetectResult, Self::Error>;
}

impl<D: Detector + ?Sized> Detector for &D {
  type Error = D::Error;

  fn detect(&self, image: &RgbImage, confidence: f32) -> Result<DetectResult, Self::Error> {
    (**self).detect(image, confidence)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectItem {
  pub class_id: u32,
  #[serde(alias = "confidence")]
  pub score: f32,
  pub bbox: [f32; 4], // [x_min, y_min, x_max, y_max]，像素坐标
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectResult {
  pub items: Box<[DetectItem]>,
  pub names: BTreeMap<u32, String>,
}

impl DetectResult {
  pub fn new(items: impl Into<Box<[DetectItem]>>, names: BTreeMap<u32, String>) -> Self {
    Self {
      items: items.into(),
      names,
    }
  }

  /// 类别表中缺失的 id 记为 `class_<id>`
  pub fn class_name(&self, class_id: u32) -> String {
    self
      .names
      .get(&class_id)
      .cloned()
      .unwrap_or_else(|| format!("class_{}", class_id))
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[cfg(feature = "model_replay")]
mod replay;
#[cfg(feature = "model_replay")]
pub use self::replay::{ReplayDetector, ReplayDetectorError};
