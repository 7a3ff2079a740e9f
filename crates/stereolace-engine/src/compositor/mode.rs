use crate::rig::Eye;

/// Axis the parity rule runs along.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum InterlaceMode {
    /// Alternating rows counted up from the bottom edge: even rows left,
    /// odd rows right.
    #[default]
    Horizontal,
    /// Alternating columns: even columns left, odd columns right.
    Vertical,
}

impl InterlaceMode {
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            InterlaceMode::Horizontal => InterlaceMode::Vertical,
            InterlaceMode::Vertical => InterlaceMode::Horizontal,
        }
    }

    /// Eye sampled for output pixel `(x, y)` of a frame `height` rows tall.
    /// `y` is a top-down row index; horizontal parity is taken from the
    /// bottom row, so the bottom row is always left-eye.
    #[inline]
    pub const fn source_eye(self, x: u32, y: u32, height: u32) -> Eye {
        let coord = match self {
            InterlaceMode::Horizontal => height.saturating_sub(1).saturating_sub(y),
            InterlaceMode::Vertical => x,
        };
        if coord % 2 == 0 { Eye::Left } else { Eye::Right }
    }

    /// Value of the `mode` field in the shader uniform.
    #[inline]
    pub(crate) const fn shader_value(self) -> u32 {
        match self {
            InterlaceMode::Horizontal => 0,
            InterlaceMode::Vertical => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_alternates_by_row_from_the_bottom() {
        let m = InterlaceMode::Horizontal;
        for x in 0..4 {
            assert_eq!(m.source_eye(x, 3, 4), Eye::Left);
            assert_eq!(m.source_eye(x, 2, 4), Eye::Right);
            assert_eq!(m.source_eye(x, 1, 4), Eye::Left);
            assert_eq!(m.source_eye(x, 0, 4), Eye::Right);
        }
    }

    #[test]
    fn odd_height_keeps_top_and_bottom_left() {
        let m = InterlaceMode::Horizontal;
        assert_eq!(m.source_eye(0, 4, 5), Eye::Left);
        assert_eq!(m.source_eye(0, 0, 5), Eye::Left);
        assert_eq!(m.source_eye(0, 1, 5), Eye::Right);
    }

    #[test]
    fn vertical_alternates_by_column() {
        let m = InterlaceMode::Vertical;
        for y in 0..4 {
            assert_eq!(m.source_eye(0, y, 4), Eye::Left);
            assert_eq!(m.source_eye(1, y, 4), Eye::Right);
            assert_eq!(m.source_eye(6, y, 4), Eye::Left);
            assert_eq!(m.source_eye(7, y, 4), Eye::Right);
        }
    }

    #[test]
    fn double_toggle_restores_assignment() {
        for start in [InterlaceMode::Horizontal, InterlaceMode::Vertical] {
            let back = start.toggled().toggled();
            assert_eq!(back, start);
            for y in 0..5 {
                for x in 0..5 {
                    assert_eq!(back.source_eye(x, y, 5), start.source_eye(x, y, 5));
                }
            }
        }
    }

    #[test]
    fn single_toggle_changes_some_pixels() {
        let h = InterlaceMode::Horizontal;
        let v = h.toggled();
        assert_ne!(h.source_eye(1, 0, 4), v.source_eye(1, 0, 4));
    }
}
