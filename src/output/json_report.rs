// 该文件是 Lumina （植光） 项目的一部分。
// src/output/json_report.rs - JSON 检测报告
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  output::Render,
  pipeline::{Finding, Report},
  plant::PlantType,
  url_to_path,
};

#[derive(Error, Debug)]
pub enum JsonReportError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 序列化错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  plant: PlantType,
  image_size: (u32, u32),
  findings: &'a [Finding],
}

/// 写出检测结果与推荐配置，不含图像
pub struct JsonReportOutput {
  path: PathBuf,
}

impl FromUrlWithScheme for JsonReportOutput {
  const SCHEME: &'static str = "json";
}

impl FromUrl for JsonReportOutput {
  type Error = JsonReportError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(JsonReportError::SchemeMismatch);
    }

    Ok(JsonReportOutput {
      path: url_to_path(uri),
    })
  }
}

impl JsonReportOutput {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

pub(crate) fn to_json(report: &Report) -> Result<String, serde_json::Error> {
  let json = JsonReport {
    generated_at: Utc::now().to_rfc3339(),
    plant: report.plant,
    image_size: report.annotated.dimensions(),
    findings: &report.findings,
  };
  serde_json::to_string_pretty(&json)
}

impl Render for JsonReportOutput {
  type Error = JsonReportError;

  fn render_report(&self, report: &Report) -> Result<(), Self::Error> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&self.path, to_json(report)?)?;
    info!("保存检测报告到文件: {}", self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    detection::{BoundingBox, Detection},
    recommend::DeviceConfig,
  };
  use image::RgbImage;

  fn report() -> Report {
    Report {
      plant: PlantType::ThurinusLettuce,
      findings: vec![
        Finding {
          detection: Detection {
            bbox: BoundingBox::new(20, 40, 80, 90),
            confidence: 0.87,
            raw_label: "Flowering".to_string(),
            label: "Growing".to_string(),
          },
          recommendation: Some(DeviceConfig::new("Red + Blue", "12,000-18,000 lux", "18-24°C")),
        },
        Finding {
          detection: Detection {
            bbox: BoundingBox::new(0, 0, 10, 10),
            confidence: 0.3,
            raw_label: "Weed".to_string(),
            label: "Weed".to_string(),
          },
          recommendation: None,
        },
      ],
      annotated: RgbImage::new(120, 100),
    }
  }

  #[test]
  fn report_json_shape() {
    let value: serde_json::Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();

    assert_eq!(value["plant"], "Thurinus Lettuce");
    assert_eq!(value["image_size"], serde_json::json!([120, 100]));
    assert!(value["generated_at"].is_string());

    let findings = value["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0]["detection"]["label"], "Growing");
    assert_eq!(findings[0]["detection"]["raw_label"], "Flowering");
    assert_eq!(findings[0]["detection"]["bbox"]["x2"], 80);
    assert_eq!(findings[0]["recommendation"]["temperature"], "18-24°C");
    assert!(findings[1]["recommendation"].is_null());
  }

  #[test]
  fn writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports/run.json");
    JsonReportOutput::new(&path).render_report(&report()).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("\"Growing\""));
  }
}
