// 该文件是 Lumina （植光） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use lumina::{
  FromUrl,
  config::Settings,
  input::ImageFileInput,
  model::ReplayDetector,
  output::{OutputWrapper, PanelOutput, Render},
  pipeline::Pipeline,
};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("检测来源: {}", args.detector);
  info!("输入来源: {}", args.input);
  info!("植物品种: {}", args.plant);

  let settings = match &args.config {
    Some(path) => Settings::load(path)?,
    None => Settings::default(),
  };
  let confidence = args.confidence.unwrap_or_else(|| settings.confidence());

  let input = ImageFileInput::from_url(&args.input)?;
  let detector = ReplayDetector::from_url(&args.detector)?;
  let pipeline = Pipeline::new(
    detector,
    settings.label_map(),
    settings.recommendation_table(),
    settings.annotator()?,
  )
  .with_confidence(confidence);
  info!("置信度阈值: {}", pipeline.confidence());

  let report = pipeline.run(input.image(), args.plant)?;
  info!("检测到 {} 个生长阶段目标", report.findings.len());

  PanelOutput.render_report(&report)?;

  for url in [&args.output, &args.report].into_iter().flatten() {
    let output = OutputWrapper::from_url(url)?;
    output.render_report(&report)?;
  }

  Ok(())
}
