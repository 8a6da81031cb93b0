use super::task::Priority;

/// Minimum displacement, in points, for a drag to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Map a drag from `start` to `end` onto an Eisenhower quadrant.
///
/// Only vertical-dominant swipes assign a quadrant: up means important,
/// down means not important, and a leftward component picks the urgent
/// variant. Short or horizontal swipes return `None`.
pub fn classify_swipe(start: (f32, f32), end: (f32, f32)) -> Option<Priority> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    if dx.abs() <= SWIPE_THRESHOLD && dy.abs() <= SWIPE_THRESHOLD {
        return None;
    }
    if dx.abs() >= dy.abs() {
        return None;
    }

    let leftward = dx < 0.0;
    if dy < -SWIPE_THRESHOLD {
        Some(if leftward {
            Priority::ImportantUrgent
        } else {
            Priority::ImportantNotUrgent
        })
    } else if dy > SWIPE_THRESHOLD {
        Some(if leftward {
            Priority::UrgentNotImportant
        } else {
            Priority::NotImportantNotUrgent
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: (f32, f32) = (100.0, 100.0);

    #[test]
    fn straight_up_is_important_not_urgent() {
        assert_eq!(
            classify_swipe(ORIGIN, (100.0, 40.0)),
            Some(Priority::ImportantNotUrgent)
        );
    }

    #[test]
    fn straight_down_is_neither() {
        assert_eq!(
            classify_swipe(ORIGIN, (100.0, 160.0)),
            Some(Priority::NotImportantNotUrgent)
        );
    }

    #[test]
    fn leftward_component_selects_urgent_quadrants() {
        assert_eq!(
            classify_swipe(ORIGIN, (80.0, 30.0)),
            Some(Priority::ImportantUrgent)
        );
        assert_eq!(
            classify_swipe(ORIGIN, (80.0, 170.0)),
            Some(Priority::UrgentNotImportant)
        );
    }

    #[test]
    fn rightward_component_keeps_not_urgent_quadrants() {
        assert_eq!(
            classify_swipe(ORIGIN, (130.0, 20.0)),
            Some(Priority::ImportantNotUrgent)
        );
    }

    #[test]
    fn horizontal_swipes_are_ignored() {
        assert_eq!(classify_swipe(ORIGIN, (40.0, 100.0)), None);
        assert_eq!(classify_swipe(ORIGIN, (180.0, 130.0)), None);
    }

    #[test]
    fn diagonal_tie_is_ignored() {
        assert_eq!(classify_swipe(ORIGIN, (30.0, 30.0)), None);
    }

    #[test]
    fn short_drags_are_ignored() {
        assert_eq!(classify_swipe(ORIGIN, (110.0, 110.0)), None);
        assert_eq!(classify_swipe(ORIGIN, (100.0, 150.0)), None);
    }
}
