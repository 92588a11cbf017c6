use super::types::Appointment;

/// Half-open `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn of(appointment: &Appointment) -> Self {
        let start = appointment.start.minutes();
        Self { start, end: start + appointment.duration_minutes as i64 }
    }

    /// Empty spans have no interior and overlap nothing.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < self.end
            && other.start < other.end
            && self.start < other.end
            && other.start < self.end
    }
}

/// Two appointments conflict when their half-open intervals share an instant.
/// Touching endpoints do not count.
pub fn overlaps(a: &Appointment, b: &Appointment) -> bool {
    Span::of(a).overlaps(&Span::of(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::testing::appt;

    #[test]
    fn partial_overlap_is_symmetric() {
        let a = appt("a", "09:00", 60);
        let b = appt("b", "09:30", 60);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn nested_appointments_overlap() {
        let outer = appt("outer", "09:00", 120);
        let inner = appt("inner", "09:30", 15);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let a = appt("a", "09:00", 60);
        let b = appt("b", "10:00", 60);
        assert_eq!(Span::of(&a).end, Span::of(&b).start);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn zero_duration_overlaps_nothing() {
        let point = appt("point", "09:30", 0);
        let around = appt("around", "09:00", 60);
        let twin = appt("twin", "09:30", 0);
        assert!(!overlaps(&point, &around));
        assert!(!overlaps(&around, &point));
        assert!(!overlaps(&point, &twin));
    }

    #[test]
    fn identical_slots_overlap() {
        let a = appt("a", "11:00", 30);
        let b = appt("b", "11:00", 30);
        assert!(overlaps(&a, &b));
    }
}
