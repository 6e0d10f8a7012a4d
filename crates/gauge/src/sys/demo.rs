use crate::events::AppEvent;
use async_channel::Sender;
use std::time::Duration;

/// Progress script played by `gauge --demo`, as `(pause before, event)`.
pub fn script() -> Vec<(Duration, AppEvent)> {
    vec![
        (Duration::from_secs(2), AppEvent::SetProgress(0.2)),
        (
            Duration::from_secs(2),
            AppEvent::AnimateProgress {
                progress: 0.7,
                duration: Some(Duration::from_secs(1)),
            },
        ),
        (
            Duration::from_secs(3),
            AppEvent::AnimateProgress {
                progress: 0.4,
                duration: Some(Duration::from_millis(600)),
            },
        ),
    ]
}

pub async fn run_demo(tx: Sender<AppEvent>) {
    loop {
        for (pause, event) in script() {
            tokio::time::sleep(pause).await;
            if tx.send(event).await.is_err() {
                return;
            }
        }
    }
}
