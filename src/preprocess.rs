// 该文件是 Lumina （植光） 项目的一部分。
// src/preprocess.rs - 推理前的图像预处理
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

use std::borrow::Cow;

use image::{Rgb, RgbImage};
use tracing::debug;

/// 8 位 HSV 色相的取值上界，0..180 对应 0..360 度
pub const HUE_RANGE: u8 = 180;
/// 绿色色相（120 度）
pub const GREEN_HUE: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preprocess {
  /// 原图直接送入模型
  #[default]
  Identity,
  /// 将每个像素的色相替换为常量，饱和度与明度保持不变
  HueOverride { hue: u8 },
}

impl Preprocess {
  pub fn green_hue() -> Self {
    Preprocess::HueOverride { hue: GREEN_HUE }
  }

  pub fn is_identity(&self) -> bool {
    matches!(self, Preprocess::Identity)
  }

  /// 不修改输入图像；`Identity` 时直接借用原图
  pub fn apply<'a>(&self, image: &'a RgbImage) -> Cow<'a, RgbImage> {
    match *self {
      Preprocess::Identity => Cow::Borrowed(image),
      Preprocess::HueOverride { hue } => {
        debug!(
          "色相覆盖预处理: hue={}, 尺寸 {}x{}",
          hue,
          image.width(),
          image.height()
        );
        let hue = hue % HUE_RANGE;
        let mut output = image.clone();
        for pixel in output.pixels_mut() {
          let (_, s, v) = rgb_to_hsv(pixel.0);
          *pixel = Rgb(hsv_to_rgb(hue, s, v));
        }
        Cow::Owned(output)
      }
    }
  }
}

/// RGB 转 8 位 HSV (H: 0..180, S: 0..255, V: 0..255)
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> (u8, u8, u8) {
  let (r, g, b) = (r as f32, g as f32, b as f32);
  let max = r.max(g).max(b);
  let min = r.min(g).min(b);
  let delta = max - min;

  let s = if max > 0.0 {
    (delta * 255.0 / max).round()
  } else {
    0.0
  };

  let mut h = if delta == 0.0 {
    0.0
  } else if max == r {
    60.0 * (g - b) / delta
  } else if max == g {
    120.0 + 60.0 * (b - r) / delta
  } else {
    240.0 + 60.0 * (r - g) / delta
  };
  if h < 0.0 {
    h += 360.0;
  }

  let h = ((h / 2.0).round() as u32 % HUE_RANGE as u32) as u8;
  (h, s as u8, max as u8)
}

/// 8 位 HSV 转 RGB
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
  let h = (h as f32 * 2.0) % 360.0 / 60.0;
  let s = s as f32 / 255.0;
  let v = v as f32 / 255.0;

  let sector = h.floor();
  let f = h - sector;
  let p = v * (1.0 - s);
  let q = v * (1.0 - s * f);
  let t = v * (1.0 - s * (1.0 - f));

  let (r, g, b) = match sector as u32 {
    0 => (v, t, p),
    1 => (q, v, p),
    2 => (p, v, t),
    3 => (p, q, v),
    4 => (t, p, v),
    _ => (v, p, q),
  };

  [r, g, b].map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
}
