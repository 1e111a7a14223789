use crate::ir::Tier;
use serde::{Deserialize, Serialize};

// Galaxy "Paired" colormap and logo colors.
pub const GXY_ORANGE_LIGHT: &str = "#fdbf6f";
pub const GXY_BLUE: &str = "#2077b3";
pub const GXY_GREEN: &str = "#74c376";
pub const GXY_DARK: &str = "#2c3143";
pub const GXY_LIGHT_TEXT: &str = "#f8f9fa";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Bold,
    Regular,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub role: FontRole,
    pub size: f32,
}

impl FontSpec {
    pub fn new(role: FontRole, size: f32) -> Self {
        Self { role, size }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStyle {
    pub fill: String,
    pub text_color: String,
    pub font: FontRole,
    pub font_size: f32,
    pub legend_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStyles {
    pub start: TierStyle,
    pub goal: TierStyle,
    pub criterion: TierStyle,
    pub tool: TierStyle,
}

impl TierStyles {
    pub fn get(&self, tier: Tier) -> &TierStyle {
        match tier {
            Tier::Start => &self.start,
            Tier::Goal => &self.goal,
            Tier::Criterion => &self.criterion,
            Tier::Tool => &self.tool,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut TierStyle {
        match tier {
            Tier::Start => &mut self.start,
            Tier::Goal => &mut self.goal,
            Tier::Criterion => &mut self.criterion,
            Tier::Tool => &mut self.tool,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub tiers: TierStyles,
    pub background: String,
    pub line_color: String,
    pub ink_color: String,
    pub description_font_size: f32,
    pub legend_font_size: f32,
    pub title_font_size: f32,
}

impl Theme {
    pub fn galaxy() -> Self {
        let tier = |fill: &str, text: &str, size: f32, legend: &str| TierStyle {
            fill: fill.to_string(),
            text_color: text.to_string(),
            font: FontRole::Bold,
            font_size: size,
            legend_label: legend.to_string(),
        };
        Self {
            tiers: TierStyles {
                start: tier(GXY_DARK, GXY_LIGHT_TEXT, 22.0, "Start"),
                goal: tier(GXY_BLUE, GXY_LIGHT_TEXT, 20.0, "Analysis goal"),
                criterion: tier(GXY_ORANGE_LIGHT, GXY_DARK, 18.0, "Decision criterion"),
                tool: tier(GXY_GREEN, GXY_DARK, 20.0, "Galaxy tool"),
            },
            background: "#FFFFFF".to_string(),
            line_color: GXY_DARK.to_string(),
            ink_color: GXY_DARK.to_string(),
            description_font_size: 14.0,
            legend_font_size: 16.0,
            title_font_size: 18.0,
        }
    }

    pub fn tier(&self, tier: Tier) -> &TierStyle {
        self.tiers.get(tier)
    }

    pub fn label_font(&self, tier: Tier) -> FontSpec {
        let style = self.tier(tier);
        FontSpec::new(style.font, style.font_size)
    }

    pub fn description_font(&self) -> FontSpec {
        FontSpec::new(FontRole::Italic, self.description_font_size)
    }

    pub fn legend_font(&self) -> FontSpec {
        FontSpec::new(FontRole::Regular, self.legend_font_size)
    }

    pub fn title_font(&self) -> FontSpec {
        FontSpec::new(FontRole::Regular, self.title_font_size)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::galaxy()
    }
}
