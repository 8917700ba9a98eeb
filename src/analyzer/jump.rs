use serde::Serialize;

use super::reference::ReferenceBaseline;

/// 跳躍フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JumpPhase {
    Grounded,
    Airborne,
}

impl Default for JumpPhase {
    fn default() -> Self {
        Self::Grounded
    }
}

/// 完了した1回のジャンプ
/// start_ms = 最初に両足が浮いたフレーム、end_ms = 最初に接地したフレーム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpEvent {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl JumpEvent {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// GROUNDED / AIRBORNE の2状態ステートマシン
///
/// 足が「浮いている」= 現在のYが基準Yより厳密に小さい（画像座標は上ほど小さい）。
/// 両足が同時に浮いた最初のフレームで離地、どちらか一方でも浮いていない
/// 最初のフレームで着地としてJumpEventを発行する。
/// ランドマーク欠落フレームでは呼び出し側がadvanceをスキップするため、
/// 状態と開始時刻は一時的な検出落ちをまたいで保持される。
#[derive(Debug, Default)]
pub struct JumpPhaseDetector {
    phase: JumpPhase,
    jump_start_ms: Option<u64>,
}

impl JumpPhaseDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// 1フレームぶん状態を進める。ジャンプが完了したフレームでのみSomeを返す
    pub fn advance(
        &mut self,
        timestamp_ms: u64,
        left_foot_y: f32,
        right_foot_y: f32,
        baseline: &ReferenceBaseline,
    ) -> Option<JumpEvent> {
        let left_lifted = left_foot_y < baseline.left_foot_y;
        let right_lifted = right_foot_y < baseline.right_foot_y;
        let airborne = left_lifted && right_lifted;

        match self.phase {
            JumpPhase::Grounded if airborne => {
                self.phase = JumpPhase::Airborne;
                self.jump_start_ms = Some(timestamp_ms);
                None
            }
            JumpPhase::Airborne if !airborne => {
                self.phase = JumpPhase::Grounded;
                let start_ms = self.jump_start_ms.take()?;
                Some(JumpEvent {
                    start_ms,
                    end_ms: timestamp_ms,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineSegment;

    fn baseline() -> ReferenceBaseline {
        ReferenceBaseline {
            shoulder_line: LineSegment::new([0.4, 0.3], [0.6, 0.3]),
            left_foot_y: 0.90,
            right_foot_y: 0.90,
        }
    }

    #[test]
    fn test_initial_phase_is_grounded() {
        let detector = JumpPhaseDetector::new();
        assert_eq!(detector.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn test_both_feet_lifted_starts_jump() {
        let mut detector = JumpPhaseDetector::new();
        let event = detector.advance(100, 0.85, 0.85, &baseline());
        assert!(event.is_none());
        assert_eq!(detector.phase(), JumpPhase::Airborne);
    }

    #[test]
    fn test_one_foot_lifted_stays_grounded() {
        let mut detector = JumpPhaseDetector::new();
        detector.advance(100, 0.85, 0.95, &baseline());
        assert_eq!(detector.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn test_foot_at_baseline_is_not_lifted() {
        // 厳密な小なり: 基準と同じYは接地扱い
        let mut detector = JumpPhaseDetector::new();
        detector.advance(100, 0.90, 0.85, &baseline());
        assert_eq!(detector.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn test_single_foot_down_ends_jump() {
        let mut detector = JumpPhaseDetector::new();
        detector.advance(100, 0.80, 0.80, &baseline());
        // 片足だけ接地しても着地になる
        let event = detector.advance(400, 0.80, 0.92, &baseline()).unwrap();
        assert_eq!(event.start_ms, 100);
        assert_eq!(event.end_ms, 400);
        assert_eq!(event.duration_ms(), 300);
        assert_eq!(detector.phase(), JumpPhase::Grounded);
    }

    #[test]
    fn test_duration_is_exact_timestamp_delta() {
        // 5フレーム空中、その前後は接地。継続時間 = 最初の空中フレームから
        // 次の接地フレームまで
        let mut detector = JumpPhaseDetector::new();
        let b = baseline();

        assert!(detector.advance(0, 0.90, 0.90, &b).is_none());
        let airborne_ts = [33, 66, 100, 133, 166];
        for ts in airborne_ts {
            assert!(detector.advance(ts, 0.80, 0.80, &b).is_none());
        }
        let event = detector.advance(200, 0.95, 0.95, &b).unwrap();
        assert_eq!(event.start_ms, 33);
        assert_eq!(event.end_ms, 200);
        assert_eq!(event.duration_ms(), 167);
    }

    #[test]
    fn test_exactly_one_event_per_jump() {
        let mut detector = JumpPhaseDetector::new();
        let b = baseline();
        let mut events = 0;

        for ts in [0, 33] {
            if detector.advance(ts, 0.95, 0.95, &b).is_some() {
                events += 1;
            }
        }
        for ts in [66, 100, 133] {
            if detector.advance(ts, 0.80, 0.80, &b).is_some() {
                events += 1;
            }
        }
        for ts in [166, 200, 233] {
            if detector.advance(ts, 0.95, 0.95, &b).is_some() {
                events += 1;
            }
        }
        assert_eq!(events, 1);
    }

    #[test]
    fn test_state_retained_across_skipped_frames() {
        // 欠落フレームではadvanceが呼ばれない。その間も状態は保持される
        let mut detector = JumpPhaseDetector::new();
        let b = baseline();
        detector.advance(100, 0.80, 0.80, &b);
        assert_eq!(detector.phase(), JumpPhase::Airborne);

        // ... フレーム 133, 166 は検出落ちでスキップ ...

        let event = detector.advance(200, 0.95, 0.95, &b).unwrap();
        assert_eq!(event.start_ms, 100);
    }
}
