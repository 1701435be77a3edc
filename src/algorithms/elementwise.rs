//! Element-wise evaluation of the conversions over scalars or arrays
//!
//! The conversions are written once, as scalar point formulas, and lifted
//! through the [`Elementwise`] trait. Two backends implement it:
//! - `f64`, always available, which just calls the point formula
//! - `ndarray::ArrayViewD<f64>` (cargo feature `ndarray`), which broadcasts its
//!   inputs with NumPy rules and evaluates the point formula per element
//!
//! Because every element goes through the scalar formula, the 1 mm snap and
//! the negative-range check are applied to each element on its own. A single
//! failing element fails the whole call; no partial output is returned.
//!
//! All inputs of one call share a backend. To mix a scalar observer with
//! array targets, pass the scalar as a 0-d array; [`scalar`] builds one and
//! broadcasting stretches it over the targets:
//!
//! ```
//! # #[cfg(feature = "ndarray")]
//! # {
//! use enu_transforms::algorithms::elementwise::{geodetic2enu, scalar};
//! use enu_transforms::AngleUnit;
//! use ndarray::array;
//!
//! let lat = array![42.001, 42.002].into_dyn();
//! let lon = array![-82.0, -82.001].into_dyn();
//! let h = array![250.0, 300.0].into_dyn();
//! let (lat0, lon0, h0) = (scalar(42.0), scalar(-82.0), scalar(200.0));
//!
//! let (e, n, u) = geodetic2enu(
//!     &lat.view(), &lon.view(), &h.view(),
//!     &lat0.view(), &lon0.view(), &h0.view(),
//!     None, AngleUnit::Degrees,
//! )
//! .unwrap();
//! assert_eq!(e.shape(), &[2]);
//! # let _ = (n, u);
//! # }
//! ```

use crate::algorithms::{aer, ellipsoid::Ellipsoid, enu};
use crate::core::AngleUnit;
use crate::validation::error::ConversionResult;

/// Numeric backend able to apply a point formula across its inputs
pub trait Elementwise {
    type Output;

    /// Evaluate `f` on every aligned element of `inputs`, collecting the
    /// three output components.
    fn zip_map<const N: usize, F>(inputs: [&Self; N], f: F) -> ConversionResult<[Self::Output; 3]>
    where
        F: FnMut([f64; N]) -> ConversionResult<[f64; 3]>;
}

impl Elementwise for f64 {
    type Output = f64;

    fn zip_map<const N: usize, F>(inputs: [&f64; N], mut f: F) -> ConversionResult<[f64; 3]>
    where
        F: FnMut([f64; N]) -> ConversionResult<[f64; 3]>,
    {
        f(inputs.map(|value| *value))
    }
}

#[cfg(feature = "ndarray")]
mod array {
    use ndarray::{arr0, ArrayD, ArrayViewD, IxDyn};

    use super::Elementwise;
    use crate::validation::error::{ConversionError, ConversionResult};

    /// 0-d array holding `value`, broadcastable against any shape
    pub fn scalar(value: f64) -> ArrayD<f64> {
        arr0(value).into_dyn()
    }

    /// Common shape of several arrays under NumPy broadcasting rules
    pub(super) fn broadcast_shape<'s>(shapes: impl IntoIterator<Item = &'s [usize]>) -> ConversionResult<Vec<usize>> {
        let mut result: Vec<usize> = Vec::new();

        for shape in shapes {
            if shape.len() > result.len() {
                let mut padded = vec![1; shape.len() - result.len()];
                padded.extend_from_slice(&result);
                result = padded;
            }

            let offset = result.len() - shape.len();
            for (axis, &dim) in shape.iter().enumerate() {
                let slot = &mut result[offset + axis];
                if *slot == dim || dim == 1 {
                    continue;
                }
                if *slot == 1 {
                    *slot = dim;
                } else {
                    return Err(ConversionError::Shape(format!(
                        "axis {} has length {} but {} was expected",
                        offset + axis,
                        dim,
                        slot
                    )));
                }
            }
        }

        Ok(result)
    }

    impl<'a> Elementwise for ArrayViewD<'a, f64> {
        type Output = ArrayD<f64>;

        fn zip_map<const N: usize, F>(inputs: [&Self; N], mut f: F) -> ConversionResult<[ArrayD<f64>; 3]>
        where
            F: FnMut([f64; N]) -> ConversionResult<[f64; 3]>,
        {
            let shape = broadcast_shape(inputs.iter().map(|input| input.shape()))?;

            let views = inputs
                .iter()
                .map(|input| {
                    input.broadcast(shape.as_slice()).ok_or_else(|| {
                        ConversionError::Shape(format!("cannot broadcast {:?} to {:?}", input.shape(), shape))
                    })
                })
                .collect::<ConversionResult<Vec<_>>>()?;

            let len: usize = shape.iter().product();
            let mut iters: Vec<_> = views.iter().map(|view| view.iter()).collect();
            let mut columns = [
                Vec::with_capacity(len),
                Vec::with_capacity(len),
                Vec::with_capacity(len),
            ];
            let mut args = [0.0; N];

            for _ in 0..len {
                for (arg, iter) in args.iter_mut().zip(iters.iter_mut()) {
                    if let Some(&value) = iter.next() {
                        *arg = value;
                    }
                }
                let values = f(args)?;
                for (column, value) in columns.iter_mut().zip(values) {
                    column.push(value);
                }
            }

            let [a, b, c] = columns;
            let build = |data: Vec<f64>| {
                ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| ConversionError::Shape(e.to_string()))
            };
            Ok([build(a)?, build(b)?, build(c)?])
        }
    }
}

#[cfg(feature = "ndarray")]
pub use array::scalar;

/// [`aer::enu2aer`] over any backend
pub fn enu2aer<T: Elementwise>(
    east: &T,
    north: &T,
    up: &T,
    unit: AngleUnit,
) -> ConversionResult<(T::Output, T::Output, T::Output)> {
    let [azimuth, elevation, range] = T::zip_map([east, north, up], |[e, n, u]| {
        let aer = aer::enu2aer(e, n, u, unit);
        Ok([aer.azimuth, aer.elevation, aer.range])
    })?;
    Ok((azimuth, elevation, range))
}

/// [`aer::aer2enu`] over any backend; fails if any range element is negative
pub fn aer2enu<T: Elementwise>(
    azimuth: &T,
    elevation: &T,
    range: &T,
    unit: AngleUnit,
) -> ConversionResult<(T::Output, T::Output, T::Output)> {
    let [east, north, up] = T::zip_map([azimuth, elevation, range], |[az, el, r]| {
        let enu = aer::aer2enu(az, el, r, unit)?;
        Ok([enu.east, enu.north, enu.up])
    })?;
    Ok((east, north, up))
}

/// [`enu::enu2geodetic`] over any backend.
///
/// Observer inputs broadcast like the rest; wrap a single observer with
/// [`scalar`] when the targets are arrays.
#[allow(clippy::too_many_arguments)]
pub fn enu2geodetic<T: Elementwise>(
    east: &T,
    north: &T,
    up: &T,
    lat0: &T,
    lon0: &T,
    h0: &T,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<(T::Output, T::Output, T::Output)> {
    let [lat, lon, alt] = T::zip_map([east, north, up, lat0, lon0, h0], |[e, n, u, lat0, lon0, h0]| {
        let lla = enu::enu2geodetic(e, n, u, lat0, lon0, h0, ell, unit)?;
        Ok([lla.lat, lla.lon, lla.alt])
    })?;
    Ok((lat, lon, alt))
}

/// [`enu::geodetic2enu`] over any backend.
///
/// Observer inputs broadcast like the rest; wrap a single observer with
/// [`scalar`] when the targets are arrays.
#[allow(clippy::too_many_arguments)]
pub fn geodetic2enu<T: Elementwise>(
    lat: &T,
    lon: &T,
    h: &T,
    lat0: &T,
    lon0: &T,
    h0: &T,
    ell: Option<&Ellipsoid>,
    unit: AngleUnit,
) -> ConversionResult<(T::Output, T::Output, T::Output)> {
    let [east, north, up] = T::zip_map([lat, lon, h, lat0, lon0, h0], |[lat, lon, h, lat0, lon0, h0]| {
        let enu = enu::geodetic2enu(lat, lon, h, lat0, lon0, h0, ell, unit)?;
        Ok([enu.east, enu.north, enu.up])
    })?;
    Ok((east, north, up))
}
