use serde::{Deserialize, Serialize};

use crate::components::color::Color;
use crate::core::body::Body;
use crate::systems::rng::Rng;

/// Strategy for a drawing option, resolved once per drawn body.
pub trait Resolver<T> {
    fn resolve(&mut self, body: &Body) -> T;
}

/// Always resolves to the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T>(pub T);

impl<T: Clone> Resolver<T> for Constant<T> {
    fn resolve(&mut self, _body: &Body) -> T {
        self.0.clone()
    }
}

/// Resolves by calling a closure with the body being drawn.
pub struct Computed<F>(pub F);

impl<T, F: FnMut(&Body) -> T> Resolver<T> for Computed<F> {
    fn resolve(&mut self, body: &Body) -> T {
        (self.0)(body)
    }
}

/// Random light fill: each channel uniform in [192, 256).
#[derive(Debug, Clone)]
pub struct RandomLightColor {
    rng: Rng,
}

impl RandomLightColor {
    pub const MIN_CHANNEL: u8 = 192;

    pub fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }

    pub fn next_color(&mut self) -> Color {
        let r = self.rng.channel(Self::MIN_CHANNEL);
        let g = self.rng.channel(Self::MIN_CHANNEL);
        let b = self.rng.channel(Self::MIN_CHANNEL);
        Color::rgb8(r, g, b)
    }
}

impl Resolver<Option<Color>> for RandomLightColor {
    fn resolve(&mut self, _body: &Body) -> Option<Color> {
        Some(self.next_color())
    }
}

/// Resolved stroke/fill settings for one rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub line_width: f32,
    pub line_color: Color,
    /// `None` draws the outline only.
    pub fill_color: Option<Color>,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            line_color: Color::BLACK,
            fill_color: None,
        }
    }
}

pub const DEFAULT_RATIO: f32 = 2.0;
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;
pub const DEFAULT_SEED: u64 = 42;

/// Drawing configuration used when binding bodies to visuals.
pub struct DrawOptions {
    /// Bitmap pixel density multiplier.
    pub ratio: f32,
    pub line_width: Box<dyn Resolver<f32>>,
    pub line_color: Box<dyn Resolver<Color>>,
    pub fill_color: Box<dyn Resolver<Option<Color>>>,
}

impl DrawOptions {
    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_line_width(mut self, resolver: impl Resolver<f32> + 'static) -> Self {
        self.line_width = Box::new(resolver);
        self
    }

    pub fn with_line_color(mut self, resolver: impl Resolver<Color> + 'static) -> Self {
        self.line_color = Box::new(resolver);
        self
    }

    pub fn with_fill_color(mut self, resolver: impl Resolver<Option<Color>> + 'static) -> Self {
        self.fill_color = Box::new(resolver);
        self
    }

    /// Resolve every option for `body`.
    pub fn style_for(&mut self, body: &Body) -> DrawStyle {
        DrawStyle {
            line_width: self.line_width.resolve(body),
            line_color: self.line_color.resolve(body),
            fill_color: self.fill_color.resolve(body),
        }
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            line_width: Box::new(Constant(DEFAULT_LINE_WIDTH)),
            line_color: Box::new(Constant(Color::BLACK)),
            fill_color: Box::new(RandomLightColor::new(DEFAULT_SEED)),
        }
    }
}

/// How shapes are filled, as written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillConfig {
    /// A fresh random light color per shape.
    #[default]
    Random,
    /// Outline only.
    None,
    Solid(Color),
}

/// Serializable viewer configuration, loaded from JSON.
///
/// ```ignore
/// let config = ViewerConfig::from_json(r##"{ "line_width": 1.5, "fill": { "solid": "#ffeecc" } }"##)?;
/// let viewer = Viewer::new(world, Scene::new(), config.into_options());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub ratio: f32,
    pub line_width: f32,
    pub line_color: Color,
    pub fill: FillConfig,
    /// Seed for random fill colors.
    pub seed: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            line_width: DEFAULT_LINE_WIDTH,
            line_color: Color::BLACK,
            fill: FillConfig::Random,
            seed: DEFAULT_SEED,
        }
    }
}

impl ViewerConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn into_options(self) -> DrawOptions {
        let options = DrawOptions::default()
            .with_ratio(self.ratio)
            .with_line_width(Constant(self.line_width))
            .with_line_color(Constant(self.line_color));
        match self.fill {
            FillConfig::Random => options.with_fill_color(RandomLightColor::new(self.seed)),
            FillConfig::None => options.with_fill_color(Constant(None)),
            FillConfig::Solid(color) => options.with_fill_color(Constant(Some(color))),
        }
    }
}
