pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Move `index` by `step` rows, staying inside `0..len`.
pub fn step_clamped(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    index.saturating_add_signed(step).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_cycles_in_both_directions() {
        assert_eq!(wrap_decrement(0, 6), 5);
        assert_eq!(wrap_increment(5, 6), 0);
        assert_eq!(wrap_increment(3, 0), 0);
    }

    #[test]
    fn clamped_steps_stop_at_the_edges() {
        assert_eq!(step_clamped(0, -5, 20), 0);
        assert_eq!(step_clamped(18, 5, 20), 19);
        assert_eq!(step_clamped(4, 1, 0), 0);
    }
}
