use crate::error::AnalysisError;
use crate::pose::{LandmarkFrame, LandmarkIndex};
use crate::render::LineSegment;

/// セッション開始時の基準ポーズ
/// 肩ラインと左右の足の基準Y座標を保持する。一度取得したら以後不変
///
/// 被写体とカメラの距離・姿勢がセッション中一定であることを仮定している
/// （セッション途中の再取得は行わない）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBaseline {
    pub shoulder_line: LineSegment,
    pub left_foot_y: f32,
    pub right_foot_y: f32,
}

impl ReferenceBaseline {
    /// 両肩と両足が揃った最初のフレームから基準を取得する
    pub fn capture(
        frame: &LandmarkFrame,
        visibility_threshold: f32,
    ) -> Result<Self, AnalysisError> {
        let left_shoulder = frame.require(LandmarkIndex::LeftShoulder, visibility_threshold)?;
        let right_shoulder = frame.require(LandmarkIndex::RightShoulder, visibility_threshold)?;
        let left_foot = frame.require(LandmarkIndex::LeftFootIndex, visibility_threshold)?;
        let right_foot = frame.require(LandmarkIndex::RightFootIndex, visibility_threshold)?;

        Ok(Self {
            shoulder_line: LineSegment::between(left_shoulder, right_shoulder),
            left_foot_y: left_foot.y,
            right_foot_y: right_foot.y,
        })
    }

    /// 基準肩ラインのY座標（両端点の平均）
    pub fn shoulder_y(&self) -> f32 {
        self.shoulder_line.mid_y()
    }
}
