//! Field Sample: Cube + Occlusion Mask

use crate::CubeError;
use ndarray::{Array3, Zip};

/// 3D spectral image for one field, axes (band, row, col)
pub type Cube = Array3<f64>;

/// Occlusion mask, same shape as the cube; `true` marks an invalid pixel
pub type Mask = Array3<bool>;

/// Band count of the reference sensor (nothing downstream hardcodes it)
pub const REFERENCE_BAND_COUNT: usize = 150;

/// One field's cube paired with its validated occlusion mask
#[derive(Debug, Clone)]
pub struct FieldSample {
    cube: Cube,
    mask: Mask,
}

impl FieldSample {
    /// Pair a cube with its mask, validating that shapes match and the
    /// spatial extent is non-empty
    pub fn new(cube: Cube, mask: Mask) -> Result<Self, CubeError> {
        if cube.dim() != mask.dim() {
            return Err(CubeError::ShapeMismatch {
                cube: cube.dim(),
                mask: mask.dim(),
            });
        }
        let (_, rows, cols) = cube.dim();
        if rows == 0 || cols == 0 {
            return Err(CubeError::EmptyField { rows, cols });
        }
        Ok(Self { cube, mask })
    }

    /// Number of spectral bands
    pub fn bands(&self) -> usize {
        self.cube.dim().0
    }

    /// Spatial extent (rows, cols) before any padding
    pub fn spatial_dims(&self) -> (usize, usize) {
        let (_, rows, cols) = self.cube.dim();
        (rows, cols)
    }

    /// Average of the two spatial edges, used for performance stratification
    pub fn average_edge(&self) -> f64 {
        let (rows, cols) = self.spatial_dims();
        (rows + cols) as f64 / 2.0
    }

    /// Raw cube values
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Occlusion mask
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Cube scaled by the intensity divisor
    pub fn normalized(&self, divisor: f64) -> Cube {
        self.cube.mapv(|v| v / divisor)
    }

    /// Normalized cube with invalid pixels zeroed, the input to padding
    /// and singular value decomposition
    pub fn masked_image(&self, divisor: f64) -> Cube {
        let mut image = self.normalized(divisor);
        Zip::from(&mut image).and(&self.mask).for_each(|v, &occluded| {
            if occluded {
                *v = 0.0;
            }
        });
        image
    }
}

/// Build a mask from the 0/1 integer flags the on-disk format uses
pub fn mask_from_flags(flags: &Array3<u8>) -> Mask {
    flags.mapv(|f| f != 0)
}
