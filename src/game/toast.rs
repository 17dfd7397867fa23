// One-slot notification queue read by the presentation layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToastKind {
    Miss,
    Celebration,
    Perfect,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Miss => "miss",
            ToastKind::Celebration => "celebration",
            ToastKind::Perfect => "perfect",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub timestamp_ms: f64,
}

impl Toast {
    pub fn miss(now: f64) -> Self {
        Self::new("MISS! Combo broken", ToastKind::Miss, now)
    }

    pub fn missed_beat(now: f64) -> Self {
        Self::new("MISS! Action beat passed", ToastKind::Miss, now)
    }

    pub fn perfect(now: f64) -> Self {
        Self::new("PERFECT!", ToastKind::Perfect, now)
    }

    pub fn celebration(combo: u32, now: f64) -> Self {
        Self::new(format!("{combo} combo! Great rhythm!"), ToastKind::Celebration, now)
    }

    fn new(message: impl Into<String>, kind: ToastKind, now: f64) -> Self {
        Self {
            message: message.into(),
            kind,
            timestamp_ms: now,
        }
    }
}

/// Holds at most one toast; a newer one replaces an unread one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastSlot(Option<Toast>);

impl ToastSlot {
    pub fn push(&mut self, toast: Toast) {
        if let Some(old) = self.0.replace(toast) {
            log::debug!("toast '{}' replaced before it was read", old.message);
        }
    }

    pub fn peek(&self) -> Option<&Toast> {
        self.0.as_ref()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_keeps_latest_only() {
        let mut slot = ToastSlot::default();
        assert!(slot.peek().is_none());
        slot.push(Toast::miss(1.0));
        slot.push(Toast::celebration(5, 2.0));
        let t = slot.peek().unwrap();
        assert_eq!(t.kind, ToastKind::Celebration);
        assert_eq!(t.message, "5 combo! Great rhythm!");
        assert_eq!(t.timestamp_ms, 2.0);
        slot.clear();
        assert!(slot.peek().is_none());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ToastKind::Miss.as_str(), "miss");
        assert_eq!(ToastKind::Perfect.as_str(), "perfect");
        assert_eq!(Toast::perfect(0.0).kind, ToastKind::Perfect);
        assert_eq!(Toast::missed_beat(0.0).kind, ToastKind::Miss);
    }
}
