// 该文件是 Lumina （植光） 项目的一部分。
// src/model/replay.rs - 回放已记录的检测结果
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::collections::BTreeMap;

use image::RgbImage;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  model::{DetectItem, DetectResult, Detector},
  url_to_path,
};

#[derive(Error, Debug)]
pub enum ReplayDetectorError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("检测记录解析错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Recording {
  #[serde(default)]
  names: BTreeMap<u32, String>,
  #[serde(default)]
  detections: Vec<DetectItem>,
}

/// 从 JSON 记录中读取检测结果，按记录顺序返回
///
/// ```json
/// {
///   "names": { "0": "Flowering", "1": "Germination" },
///   "detections": [ { "bbox": [20, 40, 80, 90], "confidence": 0.87, "class_id": 0 } ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReplayDetector {
  recording: DetectResult,
}

impl FromUrlWithScheme for ReplayDetector {
  const SCHEME: &'static str = "replay";
}

impl FromUrl for ReplayDetector {
  type Error = ReplayDetectorError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI 方案不匹配: 期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ReplayDetectorError::SchemeMismatch(url.scheme().to_string()));
    }

    let path = url_to_path(url);
    info!("加载检测记录: {}", path.display());
    let data = std::fs::read_to_string(&path)?;
    Self::from_json(&data)
  }
}

impl ReplayDetector {
  pub fn new(recording: DetectResult) -> Self {
    Self { recording }
  }

  pub fn from_json(data: &str) -> Result<Self, ReplayDetectorError> {
    let Recording { names, detections } = serde_json::from_str(data)?;
    debug!(
      "检测记录: {} 个类别, {} 个目标",
      names.len(),
      detections.len()
    );
    Ok(Self::new(DetectResult::new(detections, names)))
  }
}

impl Detector for ReplayDetector {
  type Error = ReplayDetectorError;

  fn detect(&self, image: &RgbImage, confidence: f32) -> Result<DetectResult, Self::Error> {
    debug!(
      "回放检测: 图像 {}x{}, 置信度阈值 {}",
      image.width(),
      image.height(),
      confidence
    );
    let items: Vec<DetectItem> = self
      .recording
      .items
      .iter()
      .filter(|item| item.score >= confidence)
      .cloned()
      .collect();
    debug!(
      "保留 {} / {} 个检测结果",
      items.len(),
      self.recording.items.len()
    );
    Ok(DetectResult::new(items, self.recording.names.clone()))
  }
}
