use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::anyhow;

use crate::analyzer::{JumpSession, MetricsFrame, SessionReport};
use crate::pose::LandmarkFrame;

/// 解析セッションをワーカースレッドで回す取り込み口
///
/// フレームは容量制限つきキューに積まれ、到着順に処理される。
/// キューが満杯のときは送信側がブロックする（フレーム落ちはさせない）。
/// 最新の出力レコードは共有スロットから取り出せる
pub struct SessionWorker {
    sender: SyncSender<LandmarkFrame>,
    latest: Arc<Mutex<Option<MetricsFrame>>>,
    frame_count: Arc<AtomicU64>,
    handle: JoinHandle<SessionReport>,
}

impl SessionWorker {
    pub fn start(session: JumpSession, queue_capacity: usize) -> Self {
        let (sender, receiver) = sync_channel::<LandmarkFrame>(queue_capacity);
        let latest = Arc::new(Mutex::new(None));
        let frame_count = Arc::new(AtomicU64::new(0));

        let latest_slot = latest.clone();
        let count = frame_count.clone();
        let handle = std::thread::spawn(move || {
            let mut session = session;
            // 送信側がドロップされたらループを抜けてレポートを返す
            for frame in receiver {
                if let Some(output) = session.process(&frame) {
                    if let Ok(mut slot) = latest_slot.lock() {
                        *slot = Some(output);
                    }
                }
                count.fetch_add(1, Ordering::Relaxed);
            }
            session.finish()
        });

        Self {
            sender,
            latest,
            frame_count,
            handle,
        }
    }

    /// フレームをキューへ積む。キューが満杯なら空きが出るまでブロックする
    pub fn send(&self, frame: LandmarkFrame) -> anyhow::Result<()> {
        self.sender
            .send(frame)
            .map_err(|_| anyhow!("セッションワーカーが停止しています"))
    }

    /// 最後に処理したフレームの出力レコード
    pub fn latest(&self) -> Option<MetricsFrame> {
        self.latest.lock().ok().and_then(|slot| *slot)
    }

    /// ワーカーが取り込んだフレーム数
    pub fn frames_ingested(&self) -> u64 {
        self.frame_count.load(Ordering::Relaxed)
    }

    /// キューを閉じ、残りのフレームを処理し切ってからレポートを返す
    pub fn finish(self) -> anyhow::Result<SessionReport> {
        drop(self.sender);
        self.handle
            .join()
            .map_err(|_| anyhow!("セッションワーカーが異常終了しました"))
    }
}
