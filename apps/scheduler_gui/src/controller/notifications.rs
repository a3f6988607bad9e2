//! Transient notifications shown over the form.
//!
//! Keyed toasts are replaced in place so a loading notice turns into its
//! outcome; unkeyed toasts stack. Every toast except a loading one expires
//! after [`TOAST_TTL`].

use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKey {
    Generate,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub key: Option<ToastKey>,
    pub level: ToastLevel,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    fn expires_at(&self) -> Option<Instant> {
        (self.level != ToastLevel::Loading).then(|| self.shown_at + TOAST_TTL)
    }
}

#[derive(Debug, Default)]
pub struct ToastCenter {
    next_id: u64,
    visible: Vec<Toast>,
    scheduled: Vec<Toast>,
}

impl ToastCenter {
    pub fn push(
        &mut self,
        key: Option<ToastKey>,
        level: ToastLevel,
        message: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let toast = self.build(key, level, message.into(), now);
        let id = toast.id;
        self.show(toast);
        id
    }

    /// Queues a toast that becomes visible once `delay` has elapsed.
    pub fn schedule(
        &mut self,
        key: Option<ToastKey>,
        level: ToastLevel,
        message: impl Into<String>,
        now: Instant,
        delay: Duration,
    ) -> u64 {
        let toast = self.build(key, level, message.into(), now + delay);
        let id = toast.id;
        self.scheduled.push(toast);
        id
    }

    /// Promotes due toasts and drops expired ones.
    pub fn tick(&mut self, now: Instant) {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|toast| toast.shown_at <= now);
        self.scheduled = pending;
        for toast in due {
            self.show(toast);
        }
        self.visible
            .retain(|toast| toast.expires_at().map_or(true, |at| at > now));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.visible.retain(|toast| toast.id != id);
    }

    pub fn visible(&self) -> &[Toast] {
        &self.visible
    }

    pub fn find(&self, key: ToastKey) -> Option<&Toast> {
        self.visible.iter().find(|toast| toast.key == Some(key))
    }

    /// Earliest instant at which the visible set changes on its own.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.visible
            .iter()
            .filter_map(Toast::expires_at)
            .chain(self.scheduled.iter().map(|toast| toast.shown_at))
            .min()
    }

    fn build(
        &mut self,
        key: Option<ToastKey>,
        level: ToastLevel,
        message: String,
        shown_at: Instant,
    ) -> Toast {
        self.next_id += 1;
        Toast {
            id: self.next_id,
            key,
            level,
            message,
            shown_at,
        }
    }

    fn show(&mut self, toast: Toast) {
        if let Some(key) = toast.key {
            if let Some(existing) = self
                .visible
                .iter_mut()
                .find(|existing| existing.key == Some(key))
            {
                *existing = toast;
                return;
            }
        }
        self.visible.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_toast_is_replaced_not_stacked() {
        let now = Instant::now();
        let mut center = ToastCenter::default();
        center.push(Some(ToastKey::Generate), ToastLevel::Loading, "Generating", now);
        center.push(Some(ToastKey::Generate), ToastLevel::Success, "Done", now);

        assert_eq!(center.visible().len(), 1);
        let toast = center.find(ToastKey::Generate).expect("generate toast");
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, "Done");
    }

    #[test]
    fn unkeyed_toasts_stack() {
        let now = Instant::now();
        let mut center = ToastCenter::default();
        center.push(None, ToastLevel::Error, "first", now);
        center.push(None, ToastLevel::Error, "second", now);
        assert_eq!(center.visible().len(), 2);
    }

    #[test]
    fn loading_survives_ttl_but_outcomes_expire() {
        let now = Instant::now();
        let mut center = ToastCenter::default();
        center.push(Some(ToastKey::Calendar), ToastLevel::Loading, "Adding", now);
        center.push(None, ToastLevel::Success, "note", now);

        center.tick(now + TOAST_TTL + Duration::from_millis(1));
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].level, ToastLevel::Loading);
        assert_eq!(center.next_deadline(), None);
    }

    #[test]
    fn scheduled_toast_appears_when_due() {
        let now = Instant::now();
        let mut center = ToastCenter::default();
        center.schedule(
            None,
            ToastLevel::Success,
            "cleared",
            now,
            Duration::from_millis(400),
        );
        assert_eq!(center.next_deadline(), Some(now + Duration::from_millis(400)));

        center.tick(now + Duration::from_millis(399));
        assert!(center.visible().is_empty());
        center.tick(now + Duration::from_millis(400));
        assert_eq!(center.visible()[0].message, "cleared");
    }

    #[test]
    fn dismiss_removes_by_id() {
        let now = Instant::now();
        let mut center = ToastCenter::default();
        let id = center.push(None, ToastLevel::Error, "bye", now);
        center.dismiss(id);
        assert!(center.visible().is_empty());
    }
}
