// 该文件是 Lumina （植光） 项目的一部分。
// src/output/panel.rs - 推荐配置面板
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

use std::fmt::Write as _;
use std::io::Write;

use crate::{output::Render, pipeline::Report};

/// 以 Markdown 形式渲染推荐配置；没有检测结果时只输出品种
pub fn format_panel(report: &Report) -> String {
  let mut panel = String::new();
  let _ = writeln!(panel, "Plant Type: {}", report.plant);

  if report.findings.is_empty() {
    return panel;
  }

  let _ = writeln!(panel);
  let _ = writeln!(panel, "## Device Configuration");
  for finding in &report.findings {
    let _ = writeln!(panel);
    let _ = writeln!(panel, "### {}", finding.detection.caption());
    if let Some(config) = &finding.recommendation {
      let _ = writeln!(panel, "**Recommended Settings:**");
      let _ = writeln!(panel, "🌈 **Light Color:** {}", config.light_color);
      let _ = writeln!(panel, "💡 **Light Intensity:** {}", config.light_intensity);
      let _ = writeln!(panel, "🌡️ **Temperature:** {}", config.temperature);
    }
    let _ = writeln!(panel, "----");
  }

  panel
}

/// 输出到标准输出
#[derive(Debug, Default)]
pub struct PanelOutput;

impl Render for PanelOutput {
  type Error = std::io::Error;

  fn render_report(&self, report: &Report) -> Result<(), Self::Error> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(format_panel(report).as_bytes())?;
    stdout.flush()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    detection::{BoundingBox, Detection},
    pipeline::Finding,
    plant::PlantType,
    recommend::DeviceConfig,
  };
  use image::RgbImage;

  fn finding(label: &str, recommendation: Option<DeviceConfig>) -> Finding {
    Finding {
      detection: Detection {
        bbox: BoundingBox::new(1, 2, 30, 40),
        confidence: 0.87,
        raw_label: label.to_string(),
        label: label.to_string(),
      },
      recommendation,
    }
  }

  #[test]
  fn lists_settings_per_detection() {
    let report = Report {
      plant: PlantType::ThurinusLettuce,
      findings: vec![
        finding(
          "Growing",
          Some(DeviceConfig::new("Red + Blue", "12,000-18,000 lux", "18-24°C")),
        ),
        finding("Seedling", None),
      ],
      annotated: RgbImage::new(1, 1),
    };
    let panel = format_panel(&report);

    assert!(panel.starts_with("Plant Type: Thurinus Lettuce\n"));
    assert!(panel.contains("## Device Configuration"));
    assert!(panel.contains("### Growing (0.87)"));
    assert!(panel.contains("🌈 **Light Color:** Red + Blue"));
    assert!(panel.contains("💡 **Light Intensity:** 12,000-18,000 lux"));
    assert!(panel.contains("🌡️ **Temperature:** 18-24°C"));
    assert_eq!(panel.matches("**Recommended Settings:**").count(), 1);
    assert_eq!(panel.matches("----").count(), 2);
    assert!(panel.find("### Growing").unwrap() < panel.find("### Seedling").unwrap());
  }

  #[test]
  fn empty_report_has_no_configuration_block() {
    let report = Report {
      plant: PlantType::OlmetieLettuce,
      findings: Vec::new(),
      annotated: RgbImage::new(1, 1),
    };
    assert_eq!(format_panel(&report), "Plant Type: Olmetie Lettuce\n");
  }
}
