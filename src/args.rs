// 该文件是 Lumina （植光） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use clap::Parser;
use lumina::plant::PlantType;
use url::Url;

/// Lumina 生长阶段检测与补光推荐
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 检测结果来源，例如 replay:///path/to/detections.json
  #[arg(long, value_name = "MODEL")]
  pub detector: Url,

  /// 上传的图像（JPEG/PNG），例如 image:///path/to/lettuce.jpg
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,

  /// 植物品种: "Olmetie Lettuce" 或 "Thurinus Lettuce"
  #[arg(long, value_name = "PLANT")]
  pub plant: PlantType,

  /// 标注图像输出路径，例如 image:///path/to/annotated.png
  #[arg(long, value_name = "OUTPUT")]
  pub output: Option<Url>,

  /// 检测报告输出路径，例如 json:///path/to/report.json
  #[arg(long, value_name = "REPORT")]
  pub report: Option<Url>,

  /// TOML 配置文件
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// 置信度阈值 (0.0 - 1.0)，覆盖配置文件
  #[arg(long, value_name = "THRESHOLD", value_parser = parse_confidence)]
  pub confidence: Option<f32>,
}

fn parse_confidence(s: &str) -> Result<f32, String> {
  let value: f32 = s.parse().map_err(|e| format!("{}", e))?;
  if (0.0..=1.0).contains(&value) {
    Ok(value)
  } else {
    Err(format!("置信度阈值必须在 0 到 1 之间: {}", value))
  }
}
