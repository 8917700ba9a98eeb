use crate::pose::LandmarkFrame;

/// 個々のランドマークを「フレーム内」とみなす可視性
const IN_FRAME_VISIBILITY: f32 = 0.8;
/// 平均可視性の下限
const AVERAGE_VISIBILITY_THRESHOLD: f32 = 0.9;
/// フレーム内ランドマーク割合の下限
const IN_FRAME_FRACTION_THRESHOLD: f32 = 0.95;

/// 被写体の全身がフレームに収まっているか
/// セッション開始前のゲートとしてホスト側が使う
pub fn body_in_frame(frame: &LandmarkFrame) -> bool {
    let in_frame = frame
        .landmarks
        .iter()
        .filter(|l| l.visibility > IN_FRAME_VISIBILITY)
        .count();
    let fraction = in_frame as f32 / frame.landmarks.len() as f32;

    frame.average_visibility() > AVERAGE_VISIBILITY_THRESHOLD
        && fraction > IN_FRAME_FRACTION_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Landmark, LandmarkFrame, LandmarkIndex};

    fn frame_with_visibility(visibility: f32) -> LandmarkFrame {
        LandmarkFrame::new(0, [Landmark::new(0.5, 0.5, visibility); LandmarkIndex::COUNT])
    }

    #[test]
    fn test_fully_visible_body_is_in_frame() {
        assert!(body_in_frame(&frame_with_visibility(0.95)));
    }

    #[test]
    fn test_low_average_visibility_is_not_in_frame() {
        assert!(!body_in_frame(&frame_with_visibility(0.85)));
    }

    #[test]
    fn test_one_hidden_landmark_fails_fraction() {
        // 17点中16点では割合 0.941 < 0.95
        let mut frame = frame_with_visibility(0.99);
        frame.landmarks[LandmarkIndex::LeftWrist as usize].visibility = 0.1;
        assert!(!body_in_frame(&frame));
    }
}
