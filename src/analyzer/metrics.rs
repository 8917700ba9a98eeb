use serde::Serialize;

use super::calibration::CalibrationScale;
use super::jump::{JumpEvent, JumpPhase};
use super::reference::ReferenceBaseline;
use crate::render::LineSegment;

/// セッション累計の最大値。どちらも単調非減少
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SessionMetrics {
    pub max_jump_height_cm: f32,
    pub max_jump_duration_ms: u64,
}

impl SessionMetrics {
    pub fn record_height(&mut self, height_cm: f32) {
        if height_cm > self.max_jump_height_cm {
            self.max_jump_height_cm = height_cm;
        }
    }

    pub fn record_jump(&mut self, event: &JumpEvent) {
        if event.duration_ms() > self.max_jump_duration_ms {
            self.max_jump_duration_ms = event.duration_ms();
        }
    }
}

/// 現在の肩ラインと基準肩ラインの垂直偏差をセンチメートルに換算する
/// 絶対値を取るため常に非負
pub fn jump_height_cm(
    current_shoulder_line: &LineSegment,
    baseline: &ReferenceBaseline,
    scale: CalibrationScale,
) -> f32 {
    let deflection = (current_shoulder_line.mid_y() - baseline.shoulder_y()).abs();
    scale.to_cm(deflection)
}

/// フレームごとの出力レコード（描画・ロギングコラボレーター向け）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsFrame {
    pub timestamp_ms: u64,
    /// 未キャリブレーション時はNone（0ではなく「利用不可」）
    pub jump_height_cm: Option<f32>,
    pub phase: JumpPhase,
    pub max_jump_height_cm: f32,
    pub max_jump_duration_ms: u64,
    /// 基準肩ライン
    pub reference_line: LineSegment,
    /// 現在の肩ライン
    pub current_line: LineSegment,
    /// このフレームで完了したジャンプ
    pub jump: Option<JumpEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_at(shoulder_y: f32) -> ReferenceBaseline {
        ReferenceBaseline {
            shoulder_line: LineSegment::new([0.4, shoulder_y], [0.6, shoulder_y]),
            left_foot_y: 0.9,
            right_foot_y: 0.9,
        }
    }

    fn scale_of(cm_per_unit: f32) -> CalibrationScale {
        // キャリブレーション経由でスケールを組み立てる
        // (height/pixel_height/K) = cm_per_unit となる入力を選ぶ
        use crate::analyzer::calibration::{calibrate_scale, CALIBRATION_FACTOR};
        use crate::pose::{Landmark, LandmarkFrame, LandmarkIndex};

        let pixel_height = 0.5f32;
        let mut landmarks = [Landmark::default(); LandmarkIndex::COUNT];
        landmarks[LandmarkIndex::Nose as usize] = Landmark::new(0.5, 0.2, 0.9);
        landmarks[LandmarkIndex::LeftAnkle as usize] = Landmark::new(0.5, 0.7, 0.9);
        landmarks[LandmarkIndex::RightAnkle as usize] = Landmark::new(0.5, 0.7, 0.9);
        landmarks[LandmarkIndex::LeftFootIndex as usize] = Landmark::new(0.5, 0.72, 0.9);
        landmarks[LandmarkIndex::RightFootIndex as usize] = Landmark::new(0.5, 0.72, 0.9);
        let frame = LandmarkFrame::new(0, landmarks);

        let height_cm = cm_per_unit * pixel_height * CALIBRATION_FACTOR;
        calibrate_scale(&frame, height_cm, 0.5).unwrap()
    }

    #[test]
    fn test_height_is_non_negative_in_both_directions() {
        let baseline = baseline_at(0.30);
        let scale = scale_of(100.0);

        // 肩が上（ジャンプ中）
        let up = LineSegment::new([0.4, 0.20], [0.6, 0.20]);
        // 肩が下（しゃがみ）
        let down = LineSegment::new([0.4, 0.40], [0.6, 0.40]);

        assert!(jump_height_cm(&up, &baseline, scale) >= 0.0);
        assert!(jump_height_cm(&down, &baseline, scale) >= 0.0);
    }

    #[test]
    fn test_height_scales_with_deflection() {
        let baseline = baseline_at(0.30);
        let scale = scale_of(100.0);
        let line = LineSegment::new([0.4, 0.20], [0.6, 0.20]);
        // 偏差 0.1 * 100cm/unit = 10cm
        assert!((jump_height_cm(&line, &baseline, scale) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_height_zero_at_baseline() {
        let baseline = baseline_at(0.30);
        let scale = scale_of(100.0);
        let line = baseline.shoulder_line;
        assert!(jump_height_cm(&line, &baseline, scale).abs() < 1e-6);
    }

    #[test]
    fn test_metrics_max_height_monotone() {
        let mut metrics = SessionMetrics::default();
        metrics.record_height(10.0);
        metrics.record_height(5.0);
        assert_eq!(metrics.max_jump_height_cm, 10.0);
        metrics.record_height(12.0);
        assert_eq!(metrics.max_jump_height_cm, 12.0);
    }

    #[test]
    fn test_metrics_max_duration_monotone() {
        let mut metrics = SessionMetrics::default();
        metrics.record_jump(&JumpEvent {
            start_ms: 0,
            end_ms: 400,
        });
        metrics.record_jump(&JumpEvent {
            start_ms: 1000,
            end_ms: 1200,
        });
        assert_eq!(metrics.max_jump_duration_ms, 400);
    }
}
