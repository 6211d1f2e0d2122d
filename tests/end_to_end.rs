// 该文件是 Lumina （植光） 项目的一部分。
// tests/end_to_end.rs - 从上传到推荐的完整流程
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

#![cfg(all(
  feature = "read_image_file",
  feature = "model_replay",
  feature = "save_image_file",
  feature = "json_report"
))]

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use url::Url;

use lumina::{
  FromUrl,
  annotate::Annotator,
  config::Settings,
  input::ImageFileInput,
  label::LabelMap,
  model::ReplayDetector,
  output::{OutputWrapper, Render, format_panel},
  pipeline::Pipeline,
  plant::PlantType,
  recommend::{DeviceConfig, RecommendationTable},
};

const RECORDING: &str = r#"{
  "names": { "0": "Flowering", "1": "Germination", "2": "Vegetative" },
  "detections": [
    { "bbox": [20.4, 40.9, 80.2, 90.7], "confidence": 0.87, "class_id": 0 },
    { "bbox": [90, 90, 110, 110], "confidence": 0.1, "class_id": 1 }
  ]
}"#;

fn url(scheme: &str, path: &Path) -> Url {
  Url::parse(&format!("{}://{}", scheme, path.display())).unwrap()
}

fn lettuce_photo() -> RgbImage {
  RgbImage::from_fn(160, 140, |x, y| Rgb([(x % 200) as u8, 120, (y % 200) as u8]))
}

#[test]
fn thurinus_flowering_end_to_end() {
  let dir = tempfile::tempdir().unwrap();
  let photo_path = dir.path().join("upload.png");
  let recording_path = dir.path().join("detections.json");
  let annotated_path = dir.path().join("out/annotated.png");
  let report_path = dir.path().join("out/report.json");

  let photo = lettuce_photo();
  photo.save_with_format(&photo_path, ImageFormat::Png).unwrap();
  std::fs::write(&recording_path, RECORDING).unwrap();

  let input = ImageFileInput::from_url(&url("image", &photo_path)).unwrap();
  let detector = ReplayDetector::from_url(&url("replay", &recording_path)).unwrap();
  let pipeline = Pipeline::new(
    detector,
    LabelMap::default(),
    RecommendationTable::builtin(),
    Annotator::default(),
  );

  let report = pipeline
    .run(input.image(), PlantType::ThurinusLettuce)
    .unwrap();

  // 低于 0.25 的结果被模型过滤
  assert_eq!(report.findings.len(), 1);
  let finding = &report.findings[0];
  assert_eq!(finding.detection.label, "Growing");
  assert_eq!(finding.detection.caption(), "Growing (0.87)");
  assert_eq!(
    finding.recommendation,
    Some(DeviceConfig::new("Red + Blue", "12,000-18,000 lux", "18-24°C"))
  );

  let overlays = pipeline.annotator().layout(160, 140, &[finding.detection.clone()]);
  assert_eq!(overlays.len(), 1);
  assert_eq!(overlays[0].caption, "Growing (0.87)");

  // 标注基于原图：框内像素未被染绿
  assert_eq!(report.annotated.get_pixel(50, 65), photo.get_pixel(50, 65));
  assert_eq!(input.image(), &photo);

  for target in [url("image", &annotated_path), url("json", &report_path)] {
    OutputWrapper::from_url(&target)
      .unwrap()
      .render_report(&report)
      .unwrap();
  }
  let saved = image::open(&annotated_path).unwrap().to_rgb8();
  assert_eq!(saved, report.annotated);
  let json = std::fs::read_to_string(&report_path).unwrap();
  assert!(json.contains("Thurinus Lettuce"));

  let panel = format_panel(&report);
  assert!(panel.contains("### Growing (0.87)"));
  assert!(panel.contains("12,000-18,000 lux"));
}

#[test]
fn configured_tables_drive_the_pipeline() {
  let settings = Settings::from_toml_str(
    r#"
confidence = 0.05

[labels]
Germination = "Sprouting"

[recommendations."Olmetie Lettuce".Sprouting]
light_color = "Blue"
light_intensity = "4,000 lux"
temperature = "15°C"
"#,
  )
  .unwrap();

  let pipeline = Pipeline::new(
    ReplayDetector::from_json(RECORDING).unwrap(),
    settings.label_map(),
    settings.recommendation_table(),
    settings.annotator().unwrap(),
  )
  .with_confidence(settings.confidence());

  let report = pipeline
    .run(&lettuce_photo(), PlantType::OlmetieLettuce)
    .unwrap();

  let labels: Vec<&str> = report.detections().map(|d| d.label.as_str()).collect();
  assert_eq!(labels, vec!["Flowering", "Sprouting"]);
  assert_eq!(report.findings[0].recommendation, None);
  assert_eq!(
    report.findings[1]
      .recommendation
      .as_ref()
      .map(|c| c.light_intensity.as_str()),
    Some("4,000 lux")
  );
}

#[test]
fn rejects_unsupported_upload() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("upload.bmp");
  lettuce_photo()
    .save_with_format(&path, ImageFormat::Bmp)
    .unwrap();
  assert!(ImageFileInput::from_url(&url("image", &path)).is_err());
}
