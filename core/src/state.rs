// storefront/src/state.rs

//! Publish/subscribe cells that view models expose their state through, and
//! the stream adapter used to drop repeated snapshots.

use futures_util::stream::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

/// A value that presentation code can read at any time or subscribe to.
///
/// Every `set`/`update` notifies subscribers, including writes of an equal
/// value. Readers that only care about real changes compare on their side.
#[derive(Debug)]
pub struct Observable<T>(Arc<watch::Sender<T>>);

impl<T: Send + Sync + 'static> Observable<T> {
  pub fn new(initial: T) -> Self {
    Observable(Arc::new(watch::channel(initial).0))
  }

  /// Current value, cloned.
  pub fn get(&self) -> T
  where
    T: Clone,
  {
    self.0.borrow().clone()
  }

  /// Runs `f` against the current value without cloning it.
  /// Do not hold on to anything borrowed across an `.await`.
  pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
    f(&self.0.borrow())
  }

  pub fn set(&self, value: T) {
    self.0.send_replace(value);
  }

  /// Mutates the value in place and notifies subscribers once.
  pub fn update(&self, f: impl FnOnce(&mut T)) {
    self.0.send_modify(f);
  }

  pub fn subscribe(&self) -> watch::Receiver<T> {
    self.0.subscribe()
  }
}

impl<T> Clone for Observable<T> {
  fn clone(&self) -> Self {
    Observable(Arc::clone(&self.0))
  }
}

impl<T: Default + Send + Sync + 'static> Default for Observable<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

/// Drops every item equal to the one emitted just before it.
pub fn distinct_until_changed<S>(stream: S) -> impl Stream<Item = S::Item>
where
  S: Stream,
  S::Item: PartialEq + Clone,
{
  stream
    .scan(None::<S::Item>, |last, item| {
      let changed = last.as_ref() != Some(&item);
      if changed {
        *last = Some(item.clone());
      }
      futures_util::future::ready(Some(changed.then_some(item)))
    })
    .filter_map(futures_util::future::ready)
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures_util::stream;

  #[test]
  fn set_and_update_are_visible_to_readers() {
    let cell = Observable::new(1);
    cell.set(2);
    assert_eq!(cell.get(), 2);
    cell.update(|v| *v += 3);
    assert_eq!(cell.read(|v| *v), 5);
  }

  #[test]
  fn subscribers_see_changes() {
    let cell = Observable::new("idle".to_string());
    let mut rx = cell.subscribe();
    assert!(!rx.has_changed().unwrap());
    cell.set("loading".to_string());
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), "loading");
  }

  #[test]
  fn clones_share_the_value() {
    let a = Observable::new(0);
    let b = a.clone();
    b.set(9);
    assert_eq!(a.get(), 9);
  }

  #[tokio::test]
  async fn consecutive_duplicates_are_dropped() {
    let source = stream::iter(vec![1, 1, 2, 2, 2, 1, 3, 3]);
    let out: Vec<i32> = distinct_until_changed(source).collect().await;
    assert_eq!(out, vec![1, 2, 1, 3]);
  }
}
