use serde::{Deserialize, Serialize};

use crate::pose::{Landmark, LandmarkFrame, LandmarkIndex};

/// 骨格の接続定義 (開始ランドマーク, 終了ランドマーク)
pub const SKELETON_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 16] = [
    // 上半身
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftElbow),
    (LandmarkIndex::LeftElbow, LandmarkIndex::LeftWrist),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightElbow),
    (LandmarkIndex::RightElbow, LandmarkIndex::RightWrist),
    // 胴体
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftHip),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightHip),
    (LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
    // 下半身
    (LandmarkIndex::LeftHip, LandmarkIndex::LeftKnee),
    (LandmarkIndex::LeftKnee, LandmarkIndex::LeftAnkle),
    (LandmarkIndex::RightHip, LandmarkIndex::RightKnee),
    (LandmarkIndex::RightKnee, LandmarkIndex::RightAnkle),
    // 足
    (LandmarkIndex::LeftAnkle, LandmarkIndex::LeftHeel),
    (LandmarkIndex::LeftHeel, LandmarkIndex::LeftFootIndex),
    (LandmarkIndex::RightAnkle, LandmarkIndex::RightHeel),
    (LandmarkIndex::RightHeel, LandmarkIndex::RightFootIndex),
];

/// 描画コラボレーター向けの線分（正規化座標）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: [f32; 2],
    pub end: [f32; 2],
}

impl LineSegment {
    pub fn new(start: [f32; 2], end: [f32; 2]) -> Self {
        Self { start, end }
    }

    /// 2ランドマーク間の線分
    pub fn between(a: &Landmark, b: &Landmark) -> Self {
        Self {
            start: [a.x, a.y],
            end: [b.x, b.y],
        }
    }

    /// 両端点のY座標の平均
    pub fn mid_y(&self) -> f32 {
        (self.start[1] + self.end[1]) / 2.0
    }

    /// ピクセル座標に変換
    pub fn to_pixel(&self, width: u32, height: u32) -> ((i32, i32), (i32, i32)) {
        let px = |p: [f32; 2]| {
            (
                (p[0] * width as f32) as i32,
                (p[1] * height as f32) as i32,
            )
        };
        (px(self.start), px(self.end))
    }
}

/// 可視なランドマーク同士を結ぶ骨格線分を列挙する
/// どちらかの端点が閾値未満の接続はスキップ
pub fn pose_segments(frame: &LandmarkFrame, visibility_threshold: f32) -> Vec<LineSegment> {
    SKELETON_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| {
            let start = frame.get(a);
            let end = frame.get(b);
            if start.is_visible(visibility_threshold) && end.is_visible(visibility_threshold) {
                Some(LineSegment::between(start, end))
            } else {
                None
            }
        })
        .collect()
}
