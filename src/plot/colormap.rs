//! Colormaps for pseudocolor and streamline plots
use plotters::style::RGBColor;

/// A colormap defined by equally spaced RGB stops
///
/// Values are normalized over the field range and linearly interpolated
/// between stops, matching the usual plotting-library behavior.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: &'static str,
    stops: &'static [(u8, u8, u8)],
}

/// The `jet` colormap, default for pseudocolor maps
const JET: &[(u8, u8, u8)] = &[
    (0, 0, 128),
    (0, 0, 255),
    (0, 255, 255),
    (255, 255, 0),
    (255, 0, 0),
    (128, 0, 0),
];

/// The `Spectral` colormap (ColorBrewer), used for streamlines
const SPECTRAL: &[(u8, u8, u8)] = &[
    (158, 1, 66),
    (213, 62, 79),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (230, 245, 152),
    (171, 221, 164),
    (102, 194, 165),
    (50, 136, 189),
    (94, 79, 162),
];

/// The diverging `RdBu` colormap (ColorBrewer), wake-plot background
const RDBU: &[(u8, u8, u8)] = &[
    (103, 0, 31),
    (178, 24, 43),
    (214, 96, 77),
    (244, 165, 130),
    (253, 219, 199),
    (247, 247, 247),
    (209, 229, 240),
    (146, 197, 222),
    (67, 147, 195),
    (33, 102, 172),
    (5, 48, 97),
];

impl Colormap {
    /// The `jet` colormap
    pub fn jet() -> Self {
        Self {
            name: "jet",
            stops: JET,
        }
    }

    /// The `Spectral` colormap
    pub fn spectral() -> Self {
        Self {
            name: "Spectral",
            stops: SPECTRAL,
        }
    }

    /// The `RdBu` colormap
    pub fn rdbu() -> Self {
        Self {
            name: "RdBu",
            stops: RDBU,
        }
    }

    /// Look a colormap up by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "jet" => Some(Self::jet()),
            "Spectral" | "spectral" => Some(Self::spectral()),
            "RdBu" | "rdbu" => Some(Self::rdbu()),
            _ => None,
        }
    }

    /// Name of this colormap
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Color at normalized position `t` in `[0, 1]`
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = t.clamp(0., 1.);
        let n = self.stops.len() - 1;
        let pos = t * n as f64;
        let lo = (pos.floor() as usize).min(n - 1);
        let frac = pos - lo as f64;
        let (r0, g0, b0) = self.stops[lo];
        let (r1, g1, b1) = self.stops[lo + 1];
        let lerp = |a: u8, b: u8| (f64::from(a) + frac * (f64::from(b) - f64::from(a))) as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Color of `value` normalized over `[vmin, vmax]`
    ///
    /// A degenerate range maps everything to the middle of the map.
    pub fn color_for(&self, value: f64, vmin: f64, vmax: f64) -> RGBColor {
        let t = if vmax > vmin {
            (value - vmin) / (vmax - vmin)
        } else {
            0.5
        };
        self.eval(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        let cmap = Colormap::jet();
        assert_eq!(cmap.eval(0.), RGBColor(0, 0, 128));
        assert_eq!(cmap.eval(1.), RGBColor(128, 0, 0));
    }

    #[test]
    fn test_interpolation_midway() {
        let cmap = Colormap::jet();
        // Halfway between the 2nd and 3rd stop: blue fading to cyan.
        let RGBColor(r, g, b) = cmap.eval(0.3);
        assert_eq!(r, 0);
        assert!(g > 100 && g < 155);
        assert_eq!(b, 255);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let cmap = Colormap::spectral();
        assert_eq!(cmap.eval(-2.), cmap.eval(0.));
        assert_eq!(cmap.eval(7.), cmap.eval(1.));
    }

    #[test]
    fn test_degenerate_range() {
        let cmap = Colormap::rdbu();
        assert_eq!(cmap.color_for(1., 1., 1.), cmap.eval(0.5));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Colormap::by_name("jet").unwrap().name(), "jet");
        assert!(Colormap::by_name("viridis").is_none());
    }
}
