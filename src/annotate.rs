// 该文件是 Lumina （植光） 项目的一部分。
// src/annotate.rs - 检测结果标注
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::{
  drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size},
  rect::Rect,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::detection::{BoundingBox, Detection};

// 文本渲染常量
pub const LABEL_FONT_SIZE: f32 = 24.0;
pub const BOX_STROKE_WIDTH: u32 = 4;
pub const MAX_STROKE_WIDTH: u32 = 64;
const LABEL_OFFSET: i32 = 10; // 文本底边到边框顶边的距离
const LABEL_MARGIN: i32 = 4;
const HIGHLIGHT_COLOR: [u8; 3] = [0, 255, 255]; // 青色
const TEXT_COLOR: [u8; 3] = [0, 0, 0];

#[derive(Error, Debug)]
pub enum AnnotatorError {
  #[error("字体文件读取错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("字体无效: {0}")]
  InvalidFont(#[from] ab_glyph::InvalidFont),
}

/// 标签背景超出画布时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPlacement {
  /// 保持原始坐标，超出部分由画布裁剪
  #[default]
  Unclamped,
  /// 将标签背景平移回画布内
  Clamped,
}

/// 单个检测结果的绘制几何
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
  pub bbox: BoundingBox,
  pub caption: String,
  pub background: Rect,
  pub text_origin: (i32, i32),
}

pub struct Annotator {
  font: FontArc,
  scale: PxScale,
  stroke_width: u32,
  highlight: Rgb<u8>,
  text_color: Rgb<u8>,
  placement: LabelPlacement,
}

impl Default for Annotator {
  fn default() -> Self {
    let font_data: &'static [u8] = include_bytes!("../assets/DejaVuSans.ttf"); // default font
    let font = FontArc::try_from_slice(font_data).expect("无法加载嵌入的字体文件");
    Self::with_font(font)
  }
}

impl Annotator {
  pub fn with_font(font: FontArc) -> Self {
    Self {
      font,
      scale: PxScale::from(LABEL_FONT_SIZE),
      stroke_width: BOX_STROKE_WIDTH,
      highlight: Rgb(HIGHLIGHT_COLOR),
      text_color: Rgb(TEXT_COLOR),
      placement: LabelPlacement::default(),
    }
  }

  /// 从 TTF/OTF 文件加载字体
  pub fn from_font_file(path: impl AsRef<Path>) -> Result<Self, AnnotatorError> {
    let data = std::fs::read(path.as_ref())?;
    let font = FontArc::try_from_vec(data)?;
    Ok(Self::with_font(font))
  }

  /// 非有限值或非正值被忽略，保留原字号
  pub fn font_size(mut self, size: f32) -> Self {
    if size.is_finite() && size > 0.0 {
      self.scale = PxScale::from(size);
    }
    self
  }

  /// 限制在 1..=MAX_STROKE_WIDTH
  pub fn stroke_width(mut self, width: u32) -> Self {
    self.stroke_width = width.clamp(1, MAX_STROKE_WIDTH);
    self
  }

  pub fn placement(mut self, placement: LabelPlacement) -> Self {
    self.placement = placement;
    self
  }

  /// 每个检测结果对应一个 `Overlay`，顺序与输入一致
  pub fn layout(&self, width: u32, height: u32, detections: &[Detection]) -> Vec<Overlay> {
    detections
      .iter()
      .map(|detection| self.overlay_for(width, height, detection))
      .collect()
  }

  fn overlay_for(&self, width: u32, height: u32, detection: &Detection) -> Overlay {
    let caption = detection.caption();
    let (text_w, text_h) = text_size(self.scale, &self.font, &caption);

    let bg_w = text_w + 2 * LABEL_MARGIN as u32;
    let bg_h = text_h + 2 * LABEL_MARGIN as u32;

    // 标签位于边框左上角上方
    let mut bg_x = detection.bbox.x1.saturating_sub(LABEL_MARGIN);
    let mut bg_y = detection
      .bbox
      .y1
      .saturating_sub(LABEL_OFFSET + text_h as i32 + LABEL_MARGIN);

    if self.placement == LabelPlacement::Clamped {
      bg_x = bg_x.clamp(0, (width as i32 - bg_w as i32).max(0));
      bg_y = bg_y.clamp(0, (height as i32 - bg_h as i32).max(0));
    }

    Overlay {
      bbox: detection.bbox,
      caption,
      background: Rect::at(bg_x, bg_y).of_size(bg_w, bg_h),
      text_origin: (
        bg_x.saturating_add(LABEL_MARGIN),
        bg_y.saturating_add(LABEL_MARGIN),
      ),
    }
  }

  // 以边框线为中心向内外各扩展一半线宽。
  // 边先裁到画布外一圈线宽的范围内，被裁掉的边本来就不可见。
  fn draw_bbox(&self, image: &mut RgbImage, bbox: &BoundingBox) {
    let stroke = self.stroke_width.min(MAX_STROKE_WIDTH) as i32;
    let half = stroke / 2;
    let reach = stroke + 1;
    let (cw, ch) = (image.width() as i32, image.height() as i32);

    let x1 = bbox.x1.clamp(-reach, cw.saturating_add(reach));
    let y1 = bbox.y1.clamp(-reach, ch.saturating_add(reach));
    let x2 = bbox.x2.clamp(-reach, cw.saturating_add(reach));
    let y2 = bbox.y2.clamp(-reach, ch.saturating_add(reach));
    let (w, h) = ((x2 - x1).max(1), (y2 - y1).max(1));

    for t in 0..stroke {
      let grow = half - t;
      let rect_w = w + 2 * grow;
      let rect_h = h + 2 * grow;
      if rect_w <= 0 || rect_h <= 0 {
        break;
      }
      let rect = Rect::at(x1 - grow, y1 - grow).of_size(rect_w as u32, rect_h as u32);
      draw_hollow_rect_mut(image, rect, self.highlight);
    }
  }

  fn draw_overlay(&self, image: &mut RgbImage, overlay: &Overlay) {
    self.draw_bbox(image, &overlay.bbox);
    draw_filled_rect_mut(image, overlay.background, self.highlight);
    draw_text_mut(
      image,
      self.text_color,
      overlay.text_origin.0,
      overlay.text_origin.1,
      self.scale,
      &self.font,
      &overlay.caption,
    );
  }

  /// 在原图的副本上绘制，原图保持不变
  pub fn annotate(&self, original: &RgbImage, detections: &[Detection]) -> RgbImage {
    let mut image = original.clone();
    let overlays = self.layout(image.width(), image.height(), detections);
    for overlay in &overlays {
      self.draw_overlay(&mut image, overlay);
    }
    debug!("已绘制 {} 个检测框", overlays.len());
    image
  }
}
