use crate::{SwipeDirection, SwipePhase};

/// Default shadow elevation of a dragged item (halved while it settles back).
pub const DEFAULT_SHADOW_ELEVATION_WHEN_DRAGGED: f32 = 4.0;

/// A packed `0xRRGGBBAA` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xff)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    #[default]
    Rectangle,
    RoundedCorners(f32),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeIcon {
    DeleteOutlined,
    DeleteFilled,
    ArchiveOutlined,
    ArchiveFilled,
    /// An icon resolved by the UI layer.
    Named(String),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeColors {
    pub container_background: Option<Rgba>,
    pub container_background_while_dragged: Option<Rgba>,
    pub click_indication: Option<Rgba>,
    pub behind_left_to_right_background: Option<Rgba>,
    pub behind_left_to_right_icon: Option<Rgba>,
    pub behind_right_to_left_background: Option<Rgba>,
    pub behind_right_to_left_icon: Option<Rgba>,
}

impl Default for SwipeColors {
    fn default() -> Self {
        let container = Rgba::rgb(0xe8, 0xde, 0xf8);
        let on_container = Rgba::rgb(0x1d, 0x19, 0x2b);
        Self::uniform_behind(
            Some(container),
            Some(on_container),
            Some(Rgba::rgb(0xf9, 0xde, 0xdc)),
            Some(Rgba::rgb(0x41, 0x0e, 0x0b)),
        )
    }
}

impl SwipeColors {
    /// Same background and icon colors behind both swipe directions.
    pub fn uniform_behind(
        container_background: Option<Rgba>,
        click_indication: Option<Rgba>,
        behind_background: Option<Rgba>,
        behind_icon: Option<Rgba>,
    ) -> Self {
        Self {
            container_background,
            container_background_while_dragged: container_background,
            click_indication,
            behind_left_to_right_background: behind_background,
            behind_left_to_right_icon: behind_icon,
            behind_right_to_left_background: behind_background,
            behind_right_to_left_icon: behind_icon,
        }
    }

    pub fn container(&self, is_being_dragged: bool) -> Option<Rgba> {
        if is_being_dragged {
            self.container_background_while_dragged
        } else {
            self.container_background
        }
    }

    /// `(background, icon)` revealed behind a swipe in `direction`.
    pub fn behind(&self, direction: SwipeDirection) -> (Option<Rgba>, Option<Rgba>) {
        match direction {
            SwipeDirection::LeftToRight => (
                self.behind_left_to_right_background,
                self.behind_left_to_right_icon,
            ),
            SwipeDirection::RightToLeft => (
                self.behind_right_to_left_background,
                self.behind_right_to_left_icon,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeShapes {
    pub container_background: Shape,
    pub behind_left_to_right: Shape,
    pub behind_right_to_left: Shape,
}

impl SwipeShapes {
    pub fn uniform(shape: Shape) -> Self {
        Self {
            container_background: shape,
            behind_left_to_right: shape,
            behind_right_to_left: shape,
        }
    }

    pub fn behind(&self, direction: SwipeDirection) -> Shape {
        match direction {
            SwipeDirection::LeftToRight => self.behind_left_to_right,
            SwipeDirection::RightToLeft => self.behind_right_to_left,
        }
    }
}

/// Icons shown behind a swiped item, per direction and swipe phase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeIcons {
    pub left_to_right_starting: Option<SwipeIcon>,
    pub right_to_left_starting: Option<SwipeIcon>,
    pub left_to_right_ongoing: Option<SwipeIcon>,
    pub right_to_left_ongoing: Option<SwipeIcon>,
    pub left_to_right_finishing: Option<SwipeIcon>,
    pub right_to_left_finishing: Option<SwipeIcon>,
}

impl Default for SwipeIcons {
    fn default() -> Self {
        Self::per_phase(
            Some(SwipeIcon::DeleteOutlined),
            Some(SwipeIcon::DeleteFilled),
            Some(SwipeIcon::DeleteFilled),
        )
    }
}

impl SwipeIcons {
    /// Same icons for both directions.
    pub fn per_phase(
        starting: Option<SwipeIcon>,
        ongoing: Option<SwipeIcon>,
        finishing: Option<SwipeIcon>,
    ) -> Self {
        Self {
            left_to_right_starting: starting.clone(),
            right_to_left_starting: starting,
            left_to_right_ongoing: ongoing.clone(),
            right_to_left_ongoing: ongoing,
            left_to_right_finishing: finishing.clone(),
            right_to_left_finishing: finishing,
        }
    }

    pub fn uniform(icon: Option<SwipeIcon>) -> Self {
        Self::per_phase(icon.clone(), icon.clone(), icon)
    }

    /// The icon to draw for `direction` in `phase`, if any (`Idle` shows nothing).
    pub fn icon(&self, direction: SwipeDirection, phase: SwipePhase) -> Option<&SwipeIcon> {
        let icon = match (direction, phase) {
            (_, SwipePhase::Idle) => return None,
            (SwipeDirection::LeftToRight, SwipePhase::Starting) => &self.left_to_right_starting,
            (SwipeDirection::RightToLeft, SwipePhase::Starting) => &self.right_to_left_starting,
            (SwipeDirection::LeftToRight, SwipePhase::Ongoing) => &self.left_to_right_ongoing,
            (SwipeDirection::RightToLeft, SwipePhase::Ongoing) => &self.right_to_left_ongoing,
            (SwipeDirection::LeftToRight, SwipePhase::Finishing | SwipePhase::Dismissed) => {
                &self.left_to_right_finishing
            }
            (SwipeDirection::RightToLeft, SwipePhase::Finishing | SwipePhase::Dismissed) => {
                &self.right_to_left_finishing
            }
        };
        icon.as_ref()
    }
}

/// Presentation options of the list items. None of these affect gesture handling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeStyle {
    pub colors: SwipeColors,
    pub shapes: SwipeShapes,
    pub icons: SwipeIcons,
    pub min_height: Option<f32>,
    pub apply_shadow_elevation_when_dragged: bool,
    pub shadow_elevation_when_dragged: f32,
}

impl Default for SwipeStyle {
    fn default() -> Self {
        Self {
            colors: SwipeColors::default(),
            shapes: SwipeShapes::default(),
            icons: SwipeIcons::default(),
            min_height: None,
            apply_shadow_elevation_when_dragged: true,
            shadow_elevation_when_dragged: DEFAULT_SHADOW_ELEVATION_WHEN_DRAGGED,
        }
    }
}

impl SwipeStyle {
    pub fn with_colors(mut self, colors: SwipeColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_shapes(mut self, shapes: SwipeShapes) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn with_icons(mut self, icons: SwipeIcons) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_min_height(mut self, min_height: Option<f32>) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn with_shadow_elevation_when_dragged(mut self, elevation: Option<f32>) -> Self {
        self.apply_shadow_elevation_when_dragged = elevation.is_some();
        self.shadow_elevation_when_dragged = elevation.unwrap_or(0.0);
        self
    }

    /// Full elevation while dragged, half while settling back, none at rest.
    pub fn shadow_elevation(&self, is_being_dragged: bool, is_settling: bool) -> f32 {
        if !self.apply_shadow_elevation_when_dragged {
            return 0.0;
        }
        if is_being_dragged {
            self.shadow_elevation_when_dragged
        } else if is_settling {
            self.shadow_elevation_when_dragged * 0.5
        } else {
            0.0
        }
    }
}
