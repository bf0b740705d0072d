// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! File system watching for continuous synchronization.
//!
//! This module provides `FileWatcher` for monitoring source directories and
//! [`drive`] for turning bursts of change events into synchronization passes.
//!
//! # Features
//!
//! - Recursive directory watching, one subscription per directory
//! - Debounced change bursts (100ms by default)
//! - Access events and changes made by passes are ignored
//! - Passes never overlap; changes seen during a pass trigger one more pass

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;

/// Paths whose changes are produced by synchronization passes.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    dir: Option<PathBuf>,
    written: HashSet<PathBuf>,
}

/// Ignore rules shared between the watch callback and the pass loop.
pub type SharedIgnoreRules = Arc<RwLock<IgnoreRules>>;

impl IgnoreRules {
    /// Builds the rules for a session copying into `destination`.
    ///
    /// Everything below the destination is ignored, unless a watched
    /// directory lies inside it. In that case source edits there must still
    /// trigger passes, so only the files written by the last pass are
    /// ignored.
    pub fn for_destination(destination: &Path, watch_dirs: &[PathBuf]) -> Self {
        let dir = if watch_dirs.iter().any(|dir| dir.starts_with(destination)) {
            tracing::debug!(
                "{} is watched, ignoring only files written by passes",
                destination.display()
            );
            None
        } else {
            Some(destination.to_path_buf())
        };
        Self {
            dir,
            written: HashSet::new(),
        }
    }

    /// Replaces the set of files written by the last pass.
    pub fn set_written(&mut self, written: &[PathBuf]) {
        self.written = written.iter().cloned().collect();
    }

    /// Returns true if a change to `path` must not trigger a pass.
    pub fn ignores(&self, path: &Path) -> bool {
        self.dir.as_ref().is_some_and(|dir| path.starts_with(dir)) || self.written.contains(path)
    }
}

/// Watches source directories and forwards relevant change events.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Creates a watcher whose events are delivered on the returned channel.
    ///
    /// # Arguments
    ///
    /// * `rules` - Events whose paths are all ignored by these rules are dropped
    pub fn new(rules: SharedIgnoreRules) -> anyhow::Result<(Self, mpsc::UnboundedReceiver<Event>)> {
        let (tx, rx) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(move |result: notify::Result<Event>| match result {
            Ok(event) => {
                let relevant = rules.read().map(|rules| is_relevant(&event, &rules)).unwrap_or(true);
                if relevant {
                    let _ = tx.send(event);
                }
            }
            Err(e) => tracing::warn!("file watch error: {e}"),
        })?;

        Ok((Self { watcher }, rx))
    }

    /// Starts watching `dir` recursively.
    pub fn watch(&mut self, dir: &Path) -> notify::Result<()> {
        self.watcher.watch(dir, RecursiveMode::Recursive)
    }
}

/// Returns true if `event` should count towards a synchronization pass.
pub fn is_relevant(event: &Event, rules: &IgnoreRules) -> bool {
    if event.kind.is_access() {
        return false;
    }
    event.paths.is_empty() || !event.paths.iter().all(|p| rules.ignores(p))
}

/// Coalesces bursts of events separated by less than a quiet period.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    quiet: Duration,
}

impl Debounce {
    /// Creates a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self { quiet }
    }

    /// Waits for the next burst and returns how many events it contained.
    ///
    /// The burst ends once no event has arrived for the quiet period.
    /// Returns `None` when the channel is closed and drained.
    pub async fn next_burst<T>(&self, events: &mut mpsc::UnboundedReceiver<T>) -> Option<usize> {
        events.recv().await?;
        let mut count = 1;

        loop {
            match tokio::time::timeout(self.quiet, events.recv()).await {
                Ok(Some(_)) => count += 1,
                Ok(None) | Err(_) => return Some(count),
            }
        }
    }
}

/// Runs `on_burst` once per debounced burst until the channel closes.
///
/// Each pass is awaited before the channel is read again, so events that
/// arrive mid-pass are held and start exactly one follow-up pass.
///
/// Returns the number of passes run.
pub async fn drive<T, F, Fut>(
    events: &mut mpsc::UnboundedReceiver<T>,
    debounce: Debounce,
    mut on_burst: F,
) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future,
{
    let mut passes = 0;
    while let Some(count) = debounce.next_burst(events).await {
        tracing::debug!("{count} change event(s), starting pass");
        on_burst().await;
        passes += 1;
    }
    passes
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use notify::EventKind;
    use tokio::time::{sleep, Instant};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn rules_for(destination: &str, watch_dirs: &[&str]) -> IgnoreRules {
        let dirs: Vec<PathBuf> = watch_dirs.iter().map(PathBuf::from).collect();
        IgnoreRules::for_destination(Path::new(destination), &dirs)
    }

    #[test]
    fn test_access_events_are_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("/src/a.svg"));
        assert!(!is_relevant(&event, &rules_for("/public", &["/src"])));
    }

    #[test]
    fn test_destination_events_are_ignored() {
        let rules = rules_for("/site/static/out", &["/site/static"]);
        let inside = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/site/static/out/a.css"));
        assert!(!is_relevant(&inside, &rules));

        let mixed = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/site/static/out/a.css"))
            .add_path(PathBuf::from("/site/static/a.css"));
        assert!(is_relevant(&mixed, &rules));
    }

    #[test]
    fn test_source_events_are_relevant() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from("/src/a.svg"));
        assert!(is_relevant(&event, &rules_for("/public", &["/src"])));
    }

    #[test]
    fn test_watched_destination_still_sees_source_edits() {
        let mut rules = rules_for("/site/public", &["/site/src", "/site/public"]);
        rules.set_written(&[PathBuf::from("/site/public/app.css")]);

        let edit = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/site/public/site.css"));
        assert!(is_relevant(&edit, &rules));

        let copy = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/site/public/app.css"));
        assert!(!is_relevant(&copy, &rules));
    }

    #[test]
    fn test_watch_dir_below_destination_disables_dir_filter() {
        let rules = rules_for("/site/public", &["/site/public/img"]);
        let edit = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/site/public/img/new.png"));
        assert!(is_relevant(&edit, &rules));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_events_trigger_one_pass() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();

        tokio::spawn(async move {
            for _ in 0..3 {
                tx.send(()).unwrap();
                sleep(ms(20)).await;
            }
            sleep(ms(500)).await;
        });

        let mut fired = Vec::new();
        let passes = drive(&mut rx, Debounce::new(ms(100)), || {
            fired.push(Instant::now());
            async {}
        })
        .await;

        assert_eq!(passes, 1);
        assert!(fired[0].duration_since(start) >= ms(140));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_trigger_separate_passes() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            tx.send(()).unwrap();
            sleep(ms(300)).await;
            tx.send(()).unwrap();
        });

        let passes = drive(&mut rx, Debounce::new(ms(100)), || async {}).await;
        assert_eq!(passes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_during_pass_are_deferred() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(()).unwrap();

        let mut mid_pass = Some(tx);
        let passes = drive(&mut rx, Debounce::new(ms(100)), || {
            let sender = mid_pass.take();
            async move {
                if let Some(tx) = sender {
                    tx.send(()).unwrap();
                    tx.send(()).unwrap();
                    sleep(ms(500)).await;
                }
            }
        })
        .await;

        assert_eq!(passes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_counts_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        drop(tx);

        let debounce = Debounce::new(ms(100));
        assert_eq!(debounce.next_burst(&mut rx).await, Some(3));
        assert_eq!(debounce.next_burst(&mut rx).await, None);
    }
}
