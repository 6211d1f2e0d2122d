// 该文件是 Lumina （植光） 项目的一部分。
// src/pipeline.rs - 检测、标注与推荐流程
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

use image::RgbImage;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
  annotate::Annotator,
  detection::{BoundingBox, Detection},
  label::LabelMap,
  model::{DetectResult, Detector},
  plant::PlantType,
  recommend::{DeviceConfig, RecommendationTable},
};

pub const DEFAULT_CONFIDENCE: f32 = 0.25;

#[derive(Error, Debug)]
pub enum PipelineError<E: std::error::Error + 'static> {
  #[error("模型推理错误: {0}")]
  Detector(#[source] E),
}

/// 一个检测结果及其推荐配置（可能没有）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
  pub detection: Detection,
  pub recommendation: Option<DeviceConfig>,
}

#[derive(Debug, Clone)]
pub struct Report {
  pub plant: PlantType,
  pub findings: Vec<Finding>,
  pub annotated: RgbImage,
}

impl Report {
  pub fn detections(&self) -> impl Iterator<Item = &Detection> {
    self.findings.iter().map(|finding| &finding.detection)
  }
}

/// 流程只持有不可变状态，每次 `run` 相互独立
pub struct Pipeline<D> {
  detector: D,
  labels: LabelMap,
  table: RecommendationTable,
  annotator: Annotator,
  confidence: f32,
}

impl<D> Pipeline<D>
where
  D: Detector,
  D::Error: std::error::Error + 'static,
{
  pub fn new(
    detector: D,
    labels: LabelMap,
    table: RecommendationTable,
    annotator: Annotator,
  ) -> Self {
    Self {
      detector,
      labels,
      table,
      annotator,
      confidence: DEFAULT_CONFIDENCE,
    }
  }

  pub fn with_confidence(mut self, confidence: f32) -> Self {
    self.confidence = confidence;
    self
  }

  pub fn confidence(&self) -> f32 {
    self.confidence
  }

  pub fn annotator(&self) -> &Annotator {
    &self.annotator
  }

  pub fn run(
    &self,
    original: &RgbImage,
    plant: PlantType,
  ) -> Result<Report, PipelineError<D::Error>> {
    info!(
      "开始检测: 品种 {}, 图像 {}x{}",
      plant,
      original.width(),
      original.height()
    );

    let input = plant.preprocess().apply(original);

    let now = std::time::Instant::now();
    let raw = self
      .detector
      .detect(&input, self.confidence)
      .map_err(PipelineError::Detector)?;
    info!("推理完成，耗时: {:.2?}, 检测到 {} 个目标", now.elapsed(), raw.len());

    let detections = self.normalize(&raw);
    let annotated = self.annotator.annotate(original, &detections);

    let findings: Vec<Finding> = detections
      .into_iter()
      .map(|detection| {
        let recommendation = self.table.resolve(plant.as_str(), &detection.label).cloned();
        if recommendation.is_none() {
          debug!("{} / {} 没有推荐配置", plant, detection.label);
        }
        Finding {
          detection,
          recommendation,
        }
      })
      .collect();

    Ok(Report {
      plant,
      findings,
      annotated,
    })
  }

  /// 保持模型输出顺序，不丢弃任何结果
  pub fn normalize(&self, raw: &DetectResult) -> Vec<Detection> {
    raw
      .items
      .iter()
      .map(|item| {
        let raw_label = raw.class_name(item.class_id);
        let label = self.labels.normalize(&raw_label);
        Detection {
          bbox: BoundingBox::from_xyxy(item.bbox),
          confidence: item.score,
          raw_label,
          label,
        }
      })
      .collect()
  }
}
