use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use vertimeter::analyzer::{body_in_frame, JumpSession};
use vertimeter::config::Config;
use vertimeter::ingest::SessionWorker;
use vertimeter::pose::LandmarkFrame;
use vertimeter::render::pose_segments;

const CONFIG_PATH: &str = "config.toml";

/// ポーズログ(JSONL)を再生してジャンプ計測を行うツール
///
/// 使い方: vertimeter <frames.jsonl> [height_cm]
fn main() -> Result<()> {
    env_logger::init();

    println!("=== Vertimeter {} ===", env!("GIT_VERSION"));

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("使い方: vertimeter <frames.jsonl> [height_cm]")?;
    let config = Config::load_or_default(CONFIG_PATH);
    let height_cm = match args.next() {
        Some(arg) => arg.parse::<f32>().context("身長(cm)を解釈できません")?,
        None => config.subject.height_cm,
    };

    println!("入力: {}", path);
    println!("身長: {} cm", height_cm);
    println!();

    let file = std::fs::File::open(&path).with_context(|| format!("開けません: {}", path))?;
    let reader = BufReader::new(file);

    let session = JumpSession::from_config(&config.analysis, height_cm);
    let worker = SessionWorker::start(session, config.ingest.queue_capacity);

    let mut parsed = 0u64;
    let mut dropped = 0u64;
    let mut out_of_frame = 0u64;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: LandmarkFrame = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("{}行目を読み飛ばします: {}", line_no + 1, e);
                dropped += 1;
                continue;
            }
        };

        if !body_in_frame(&frame) {
            out_of_frame += 1;
        }
        log::debug!(
            "{}ms: {}セグメント描画可能",
            frame.timestamp_ms,
            pose_segments(&frame, config.analysis.visibility_threshold).len()
        );

        worker.send(frame)?;
        parsed += 1;

        if parsed % 300 == 0 {
            if let Some(latest) = worker.latest() {
                println!(
                    "  {}ms  高さ {}  最大 {:.1} cm",
                    latest.timestamp_ms,
                    latest
                        .jump_height_cm
                        .map(|h| format!("{:.1} cm", h))
                        .unwrap_or_else(|| "---".to_string()),
                    latest.max_jump_height_cm,
                );
            }
        }
    }

    let report = worker.finish()?;

    println!();
    println!("=== 計測結果 ===");
    println!("フレーム数: {} (読み飛ばし {})", parsed, dropped);
    if out_of_frame > 0 {
        println!("全身が映っていないフレーム: {}", out_of_frame);
    }
    println!("ジャンプ回数: {}", report.jumps.len());
    println!("最大ジャンプ高: {:.1} cm", report.max_jump_height_cm);
    println!("最大滞空時間: {} ms", report.max_jump_duration_ms);
    println!("高さ系列ピーク数: {}", report.series.peaks().len());
    for (i, jump) in report.jumps.iter().enumerate() {
        println!(
            "  #{}: {}ms - {}ms ({} ms)",
            i + 1,
            jump.start_ms,
            jump.end_ms,
            jump.duration_ms()
        );
    }

    Ok(())
}
