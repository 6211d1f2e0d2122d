// 该文件是 Lumina （植光） 项目的一部分。
// src/config.rs - 配置文件
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

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
  annotate::{
    Annotator, AnnotatorError, BOX_STROKE_WIDTH, LABEL_FONT_SIZE, LabelPlacement, MAX_STROKE_WIDTH,
  },
  label::LabelMap,
  pipeline::DEFAULT_CONFIDENCE,
  recommend::RecommendationTable,
};

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("配置文件解析错误: {0}")]
  TomlError(#[from] toml::de::Error),
  #[error("置信度阈值超出范围 [0, 1]: {0}")]
  InvalidConfidence(f32),
  #[error("字号必须为正数: {0}")]
  InvalidFontSize(f32),
  #[error("线宽超出范围 [1, 64]: {0}")]
  InvalidStrokeWidth(u32),
  #[error("标注器错误: {0}")]
  AnnotatorError(#[from] AnnotatorError),
}

/// 所有字段均可省略，省略时使用内置默认值
///
/// ```toml
/// confidence = 0.25
///
/// [labels]
/// Flowering = "Growing"
///
/// [recommendations."Olmetie Lettuce".Germination]
/// light_color = "Blue"
/// light_intensity = "5,000-10,000 lux"
/// temperature = "16-20°C"
///
/// [annotation]
/// font_size = 24.0
/// placement = "clamped"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  pub confidence: Option<f32>,
  pub labels: Option<LabelMap>,
  pub recommendations: Option<RecommendationTable>,
  pub annotation: AnnotationSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationSettings {
  pub font: Option<PathBuf>,
  pub font_size: f32,
  pub stroke_width: u32,
  pub placement: LabelPlacement,
}

impl Default for AnnotationSettings {
  fn default() -> Self {
    Self {
      font: None,
      font_size: LABEL_FONT_SIZE,
      stroke_width: BOX_STROKE_WIDTH,
      placement: LabelPlacement::default(),
    }
  }
}

impl Settings {
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    info!("加载配置文件: {}", path.display());
    let data = std::fs::read_to_string(path)?;
    Self::from_toml_str(&data)
  }

  pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
    let settings: Settings = toml::from_str(data)?;
    if let Some(confidence) = settings.confidence
      && !(0.0..=1.0).contains(&confidence)
    {
      return Err(ConfigError::InvalidConfidence(confidence));
    }

    let annotation = &settings.annotation;
    if !(annotation.font_size.is_finite() && annotation.font_size > 0.0) {
      return Err(ConfigError::InvalidFontSize(annotation.font_size));
    }
    if !(1..=MAX_STROKE_WIDTH).contains(&annotation.stroke_width) {
      return Err(ConfigError::InvalidStrokeWidth(annotation.stroke_width));
    }
    Ok(settings)
  }

  pub fn confidence(&self) -> f32 {
    self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
  }

  /// 配置中的标签映射整体替换默认映射
  pub fn label_map(&self) -> LabelMap {
    self.labels.clone().unwrap_or_default()
  }

  /// 配置中的推荐表整体替换内置推荐表
  pub fn recommendation_table(&self) -> RecommendationTable {
    self
      .recommendations
      .clone()
      .unwrap_or_else(RecommendationTable::builtin)
  }

  pub fn annotator(&self) -> Result<Annotator, ConfigError> {
    let annotation = &self.annotation;
    let annotator = match &annotation.font {
      Some(path) => {
        info!("加载字体文件: {}", path.display());
        Annotator::from_font_file(path)?
      }
      None => Annotator::default(),
    };
    Ok(
      annotator
        .font_size(annotation.font_size)
        .stroke_width(annotation.stroke_width)
        .placement(annotation.placement),
    )
  }
}
