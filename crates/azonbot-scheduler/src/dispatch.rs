//! Fan-out: one personalized message per subscriber for a matched prayer.

use azonbot_core::notify::Notifier;
use azonbot_core::types::{Prayer, Subscriber};
use futures::StreamExt;

/// The outgoing notification text, embedding the subscriber's own mosque
/// time for the matched prayer.
pub fn render_message(prayer: Prayer, display_time: &str) -> String {
    format!(
        "📢 *{} {display_time}* namozi vaqti yetib keldi! Alloh qabul qilsin. 🤲",
        prayer.label()
    )
}

/// Send the matched prayer's notification to every subscriber in the roster.
///
/// A subscriber whose profile lacks the matched prayer's time is skipped
/// (logged, batch continues); delivery failures are likewise isolated per
/// recipient. Sends run concurrently up to `concurrency`, and the call
/// returns only after every launched send has finished.
///
/// Returns the number of attempted sends.
pub async fn dispatch(
    prayer: Prayer,
    roster: &[Subscriber],
    notifier: &dyn Notifier,
    concurrency: usize,
) -> usize {
    let targets: Vec<(i64, String)> = roster
        .iter()
        .filter_map(|subscriber| match subscriber.masjid.display_time(prayer) {
            Some(time) => Some((subscriber.telegram_id, render_message(prayer, time))),
            None => {
                tracing::warn!(
                    "⚠️ Subscriber {} has no '{}' time in their profile, skipping",
                    subscriber.telegram_id,
                    prayer.key()
                );
                None
            }
        })
        .collect();

    let attempted = targets.len();
    futures::stream::iter(targets)
        .for_each_concurrent(concurrency.max(1), |(chat_id, text)| async move {
            if let Err(e) = notifier.send(chat_id, &text).await {
                tracing::warn!("⚠️ Delivery to {chat_id} failed: {e}");
            }
        })
        .await;

    attempted
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use azonbot_core::error::{AzonError, Result};
    use azonbot_core::types::PrayerTimes;
    use std::sync::Mutex;

    /// Records every send; fails for chat ids listed in `fail_for`.
    struct RecordingNotifier {
        sent: Mutex<Vec<(i64, String)>>,
        fail_for: Vec<i64>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: Vec::new(),
            }
        }

        fn failing_for(ids: &[i64]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: ids.to_vec(),
            }
        }

        fn sent(&self) -> Vec<(i64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, chat_id: i64, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            if self.fail_for.contains(&chat_id) {
                return Err(AzonError::Telegram("blocked by user".into()));
            }
            Ok(())
        }
    }

    fn subscriber(id: i64, bomdod: Option<&str>) -> Subscriber {
        Subscriber {
            telegram_id: id,
            masjid: PrayerTimes {
                bomdod: bomdod.map(String::from),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_render_embeds_label_and_time() {
        let text = render_message(Prayer::Bomdod, "04:56");
        assert_eq!(
            text,
            "📢 *Bomdod 04:56* namozi vaqti yetib keldi! Alloh qabul qilsin. 🤲"
        );
    }

    #[tokio::test]
    async fn test_one_send_per_subscriber() {
        let roster = vec![
            subscriber(1, Some("04:56")),
            subscriber(2, Some("05:00")),
            subscriber(3, Some("04:58")),
        ];
        let notifier = RecordingNotifier::new();
        let attempted = dispatch(Prayer::Bomdod, &roster, &notifier, 8).await;
        assert_eq!(attempted, 3);
        assert_eq!(notifier.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_each_subscriber_gets_their_own_time() {
        let roster = vec![subscriber(1, Some("04:56")), subscriber(2, Some("05:00"))];
        let notifier = RecordingNotifier::new();
        dispatch(Prayer::Bomdod, &roster, &notifier, 2).await;

        let mut sent = notifier.sent();
        sent.sort_by_key(|(id, _)| *id);
        assert!(sent[0].1.contains("04:56"));
        assert!(sent[1].1.contains("05:00"));
    }

    #[tokio::test]
    async fn test_missing_time_skips_only_that_subscriber() {
        let roster = vec![
            subscriber(1, Some("04:56")),
            subscriber(2, None),
            subscriber(3, Some("05:01")),
        ];
        let notifier = RecordingNotifier::new();
        let attempted = dispatch(Prayer::Bomdod, &roster, &notifier, 8).await;
        assert_eq!(attempted, 2);

        let ids: Vec<i64> = notifier.sent().iter().map(|(id, _)| *id).collect();
        assert!(ids.contains(&1));
        assert!(!ids.contains(&2));
        assert!(ids.contains(&3));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_batch() {
        let roster = vec![
            subscriber(1, Some("04:56")),
            subscriber(2, Some("04:56")),
            subscriber(3, Some("04:56")),
        ];
        let notifier = RecordingNotifier::failing_for(&[2]);
        let attempted = dispatch(Prayer::Bomdod, &roster, &notifier, 1).await;
        assert_eq!(attempted, 3);
        assert_eq!(notifier.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_roster_sends_nothing() {
        let notifier = RecordingNotifier::new();
        let attempted = dispatch(Prayer::Peshin, &[], &notifier, 8).await;
        assert_eq!(attempted, 0);
        assert!(notifier.sent().is_empty());
    }
}
