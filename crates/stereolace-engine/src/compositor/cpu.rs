use crate::backend::software::{PixelBuffer, SoftwareTarget};
use crate::error::{StereoError, StereoResult};
use crate::rig::Eye;

use super::state::{validate_targets, CompositeParams};

/// Interlaces two software targets into a new buffer at the output resolution.
pub fn interlace(
    left: &SoftwareTarget,
    right: &SoftwareTarget,
    params: &CompositeParams,
) -> StereoResult<PixelBuffer> {
    let mut out = PixelBuffer::new(params.resolution);
    interlace_into(&mut out, left, right, params)?;
    Ok(out)
}

/// Interlaces into `out`, reallocating it if it is not at the output
/// resolution. Nothing is written when a target does not match.
pub(crate) fn interlace_into(
    out: &mut PixelBuffer,
    left: &SoftwareTarget,
    right: &SoftwareTarget,
    params: &CompositeParams,
) -> StereoResult<()> {
    if params.resolution.is_empty() {
        return Err(StereoError::ZeroResolution {
            width: params.resolution.width,
            height: params.resolution.height,
        });
    }
    validate_targets(params, left, right)?;

    if out.resolution() != params.resolution {
        *out = PixelBuffer::new(params.resolution);
    }

    let width = params.resolution.width as usize;
    let height = params.resolution.height;
    let (lp, rp) = (left.buffer().pixels(), right.buffer().pixels());

    for (row, dst) in out.pixels_mut().chunks_exact_mut(width).enumerate() {
        let start = row * width;
        for (col, px) in dst.iter_mut().enumerate() {
            let src = match params.mode.source_eye(col as u32, row as u32, height) {
                Eye::Left => lp,
                Eye::Right => rp,
            };
            *px = src[start + col];
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::InterlaceMode;
    use crate::coords::Resolution;

    const L: [u8; 4] = [255, 0, 0, 255];
    const R: [u8; 4] = [0, 0, 255, 255];

    fn pair(res: Resolution) -> (SoftwareTarget, SoftwareTarget) {
        (
            SoftwareTarget::new(Eye::Left, PixelBuffer::filled(res, L)),
            SoftwareTarget::new(Eye::Right, PixelBuffer::filled(res, R)),
        )
    }

    fn params(w: u32, h: u32, mode: InterlaceMode) -> CompositeParams {
        CompositeParams {
            resolution: Resolution::new(w, h),
            mode,
        }
    }

    #[test]
    fn horizontal_4x4_bottom_row_is_left() {
        let (l, r) = pair(Resolution::new(4, 4));
        let out = interlace(&l, &r, &params(4, 4, InterlaceMode::Horizontal)).unwrap();
        for x in 0..4 {
            assert_eq!(out.pixel(x, 3), Some(L));
            assert_eq!(out.pixel(x, 2), Some(R));
            assert_eq!(out.pixel(x, 1), Some(L));
            assert_eq!(out.pixel(x, 0), Some(R));
        }
    }

    #[test]
    fn vertical_even_columns_left() {
        let (l, r) = pair(Resolution::new(5, 3));
        let out = interlace(&l, &r, &params(5, 3, InterlaceMode::Vertical)).unwrap();
        for y in 0..3 {
            for x in 0..5 {
                let expected = if x % 2 == 0 { L } else { R };
                assert_eq!(out.pixel(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn samples_the_same_pixel_position() {
        let res = Resolution::new(3, 2);
        let mut lb = PixelBuffer::new(res);
        let mut rb = PixelBuffer::new(res);
        for y in 0..2 {
            for x in 0..3 {
                lb.set_pixel(x, y, [x as u8, y as u8, 0, 1]);
                rb.set_pixel(x, y, [x as u8, y as u8, 0, 2]);
            }
        }
        let l = SoftwareTarget::new(Eye::Left, lb);
        let r = SoftwareTarget::new(Eye::Right, rb);
        let out = interlace(&l, &r, &params(3, 2, InterlaceMode::Horizontal)).unwrap();
        assert_eq!(out.pixel(2, 1), Some([2, 1, 0, 1]));
        assert_eq!(out.pixel(2, 0), Some([2, 0, 0, 2]));
    }

    #[test]
    fn mismatched_target_is_rejected() {
        let l = SoftwareTarget::new(Eye::Left, PixelBuffer::filled(Resolution::new(4, 4), L));
        let r = SoftwareTarget::new(Eye::Right, PixelBuffer::filled(Resolution::new(4, 3), R));
        let err = interlace(&l, &r, &params(4, 4, InterlaceMode::Horizontal)).unwrap_err();
        match err {
            StereoError::TargetMismatch { eye, id, actual, expected } => {
                assert_eq!(eye, Eye::Right);
                assert_eq!(id, crate::targets::CaptureTarget::id(&r));
                assert_eq!(actual, Resolution::new(4, 3));
                assert_eq!(expected, Resolution::new(4, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stale_output_resolution_is_not_used() {
        let (l, r) = pair(Resolution::new(2, 4));
        let mut out = PixelBuffer::new(Resolution::new(8, 8));
        interlace_into(&mut out, &l, &r, &params(2, 4, InterlaceMode::Horizontal)).unwrap();
        assert_eq!(out.resolution(), Resolution::new(2, 4));
        assert_eq!(out.pixel(1, 3), Some(L));
        assert_eq!(out.pixel(1, 0), Some(R));
    }
}
