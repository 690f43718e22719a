//! Convolution kernels: the normalized Gaussian used by blur and the
//! fixed 3x3 sharpen kernel.
//!
//! Kernels are square with an odd side so that they have a well-defined
//! center tap. Weights are stored row-major.

use crate::transform::TransformError;

/// Largest accepted Gaussian radius. The window holds `(2r + 1)²` weights.
pub const MAX_RADIUS: u32 = 1024;

/// Normalized 2D Gaussian kernel.
///
/// `weights[i][j] = exp(-(dx² + dy²) / (2σ²)) / Σ`, where `dx`, `dy` are the
/// offsets of tap `(i, j)` from the center and `Σ` is the sum of all raw
/// values over the window. The weights therefore sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    radius: u32,
    sigma: f64,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build a kernel of side `2 * radius + 1`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidArgument` if `sigma` is not a
    /// positive finite number, or if `radius` exceeds [`MAX_RADIUS`].
    ///
    /// # Example
    ///
    /// ```
    /// use caramel_core::GaussianKernel;
    ///
    /// let k = GaussianKernel::build(1, 1.0).unwrap();
    /// assert_eq!(k.side(), 3);
    /// let sum: f64 = k.weights().iter().sum();
    /// assert!((sum - 1.0).abs() < 1e-9);
    /// ```
    pub fn build(radius: u32, sigma: f64) -> Result<Self, TransformError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(TransformError::InvalidArgument(format!(
                "sigma must be a positive finite number, got {sigma}"
            )));
        }

        if radius > MAX_RADIUS {
            return Err(TransformError::InvalidArgument(format!(
                "blur radius must be at most {MAX_RADIUS}, got {radius}"
            )));
        }

        let r = radius as i64;
        let side = 2 * radius as usize + 1;
        let mut weights: Vec<f64> = Vec::with_capacity(side * side);
        for dy in -r..=r {
            for dx in -r..=r {
                let d = (dx * dx + dy * dy) as f64;
                // Divide by sigma twice instead of by 2σ², which underflows
                // to zero for tiny sigma. Off-center taps then go to exp(-inf) = 0.
                weights.push((-(d / sigma) / (2.0 * sigma)).exp());
            }
        }

        // The center tap is exp(0) = 1, so the sum is never below 1.
        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self {
            radius,
            sigma,
            weights,
        })
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Side length of the square window (`2 * radius + 1`).
    #[inline]
    pub fn side(&self) -> usize {
        2 * self.radius as usize + 1
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at the given offset from center, or `None` outside the window.
    pub fn weight(&self, dy: i64, dx: i64) -> Option<f64> {
        let r = self.radius as i64;
        if dy.abs() > r || dx.abs() > r {
            return None;
        }
        let side = self.side();
        let idx = (dy + r) as usize * side + (dx + r) as usize;
        Some(self.weights[idx])
    }
}

/// General square kernel with an odd side, consumed by the convolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    side: usize,
    weights: Vec<f64>,
}

impl ConvolutionKernel {
    /// Wrap row-major weights as a `side x side` kernel.
    pub fn new(side: usize, weights: Vec<f64>) -> Result<Self, TransformError> {
        if side == 0 || side % 2 == 0 {
            return Err(TransformError::InvalidArgument(format!(
                "kernel side must be odd, got {side}"
            )));
        }
        if weights.len() != side * side {
            return Err(TransformError::InvalidArgument(format!(
                "kernel of side {side} needs {} weights, got {}",
                side * side,
                weights.len()
            )));
        }
        Ok(Self { side, weights })
    }

    /// The 3x3 sharpen kernel `[[0,-1,0],[-1,4k+1,-1],[0,-1,0]]`.
    pub fn sharpen(intensity: f64) -> Self {
        let center = 4.0 * intensity + 1.0;
        #[rustfmt::skip]
        let weights = vec![
            0.0, -1.0, 0.0,
            -1.0, center, -1.0,
            0.0, -1.0, 0.0,
        ];
        Self { side: 3, weights }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Half-width of the kernel window.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl From<GaussianKernel> for ConvolutionKernel {
    fn from(kernel: GaussianKernel) -> Self {
        let side = kernel.side();
        Self {
            side,
            weights: kernel.weights,
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
