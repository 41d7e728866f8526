use std::time::{Duration, Instant};

use crate::links::OutboundLink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOpen {
    pub link: OutboundLink,
    pub due_at: Instant,
}

/// Staggered link launches. Scheduling a new batch cancels whatever the
/// previous batch had not launched yet.
#[derive(Debug, Clone)]
pub struct OpenSchedule {
    spacing: Duration,
    pending: Vec<PendingOpen>,
}

impl OpenSchedule {
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            pending: Vec::new(),
        }
    }

    pub fn schedule<'a>(
        &mut self,
        links: impl IntoIterator<Item = &'a OutboundLink>,
        now: Instant,
    ) -> usize {
        let cancelled = self.cancel();
        let mut due_at = now;
        for link in links {
            self.pending.push(PendingOpen {
                link: link.clone(),
                due_at,
            });
            due_at += self.spacing;
        }
        cancelled
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<PendingOpen> {
        let (due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.due_at <= now);
        self.pending = rest;
        due
    }

    pub fn cancel(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn pending(&self) -> &[PendingOpen] {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::OpenSchedule;
    use crate::links::derive_links;
    use crate::model::CompanyRecord;

    #[test]
    fn opens_fire_at_spacing_intervals() {
        let links = derive_links(&CompanyRecord::new("7974", "任天堂"));
        let start = Instant::now();
        let mut schedule = OpenSchedule::new(Duration::from_millis(400));
        schedule.schedule(links.open_order(), start);

        assert_eq!(schedule.take_due(start).len(), 1);
        assert!(schedule.take_due(start + Duration::from_millis(399)).is_empty());
        assert_eq!(schedule.take_due(start + Duration::from_millis(800)).len(), 2);
        assert_eq!(schedule.take_due(start + Duration::from_millis(1_200)).len(), 1);
        assert!(schedule.is_idle());
    }

    #[test]
    fn rescheduling_cancels_previous_batch() {
        let first = derive_links(&CompanyRecord::new("7974", "任天堂"));
        let second = derive_links(&CompanyRecord::new("6758", "ソニーグループ"));
        let start = Instant::now();
        let mut schedule = OpenSchedule::new(Duration::from_millis(400));

        schedule.schedule(first.open_order(), start);
        schedule.take_due(start);
        let cancelled = schedule.schedule(second.open_order(), start + Duration::from_millis(100));

        assert_eq!(cancelled, 3);
        let due = schedule.take_due(start + Duration::from_secs(10));
        assert_eq!(due.len(), 4);
        assert!(due.iter().all(|open| !open.link.url.contains("7974")));
    }
}
