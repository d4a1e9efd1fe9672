//! Linear fall model

use super::state::FallingEntity;

/// Result of one motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Falling,
    /// Top edge reached the bottom of the field
    ExitedBottom,
}

/// Move a drop down by one tick at its fixed speed
pub fn advance(entity: &mut FallingEntity, field_height: f32) -> Motion {
    entity.pos.y += entity.speed;
    if entity.pos.y >= field_height {
        Motion::ExitedBottom
    } else {
        Motion::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_RATE;

    #[test]
    fn test_constant_speed() {
        let mut drop = FallingEntity::new(1, 42.0, true, 2.0, 480.0);
        let speed = drop.speed;
        let mut last_y = drop.pos.y;
        for _ in 0..10 {
            assert_eq!(advance(&mut drop, 480.0), Motion::Falling);
            assert!((drop.pos.y - last_y - speed).abs() < 1e-4);
            last_y = drop.pos.y;
        }
        // No horizontal drift
        assert_eq!(drop.pos.x, 42.0);
    }

    #[test]
    fn test_exits_after_fall_duration() {
        let height = 500.0;
        let mut drop = FallingEntity::new(1, 0.0, false, 3.0, height);
        let ticks = 3 * TICK_RATE;

        let mut exited_at = None;
        for tick in 1..=ticks + 2 {
            if advance(&mut drop, height) == Motion::ExitedBottom {
                exited_at = Some(tick);
                break;
            }
        }
        // Float accumulation may land one tick either side
        let exited_at = exited_at.expect("drop never left the field");
        assert!(exited_at.abs_diff(ticks) <= 1, "exited at tick {exited_at}");
    }
}
