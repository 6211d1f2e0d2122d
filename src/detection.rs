// 该文件是 Lumina （植光） 项目的一部分。
// src/detection.rs - 归一化后的检测结果
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

use serde::Serialize;

/// 坐标绝对值上限，远大于任何实际图像尺寸
pub const COORD_LIMIT: i32 = 1 << 24;

/// 像素坐标的边框 (x1, y1) - (x2, y2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
  pub x1: i32,
  pub y1: i32,
  pub x2: i32,
  pub y2: i32,
}

impl BoundingBox {
  /// 坐标被限制在 ±COORD_LIMIT 内
  pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
    let clip = |v: i32| v.clamp(-COORD_LIMIT, COORD_LIMIT);
    Self {
      x1: clip(x1),
      y1: clip(y1),
      x2: clip(x2),
      y2: clip(y2),
    }
  }

  /// 浮点坐标向零截断，NaN 记为 0
  pub fn from_xyxy(bbox: [f32; 4]) -> Self {
    Self::new(
      bbox[0] as i32,
      bbox[1] as i32,
      bbox[2] as i32,
      bbox[3] as i32,
    )
  }

  /// 至少 1 像素
  pub fn width(&self) -> u32 {
    self.x2.saturating_sub(self.x1).max(1) as u32
  }

  /// 至少 1 像素
  pub fn height(&self) -> u32 {
    self.y2.saturating_sub(self.y1).max(1) as u32
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
  pub bbox: BoundingBox,
  pub confidence: f32,
  pub raw_label: String,
  pub label: String,
}

impl Detection {
  /// 形如 `Growing (0.87)` 的标注文本
  pub fn caption(&self) -> String {
    format!("{} ({:.2})", self.label, self.confidence)
  }
}
