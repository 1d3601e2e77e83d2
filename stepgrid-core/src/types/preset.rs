//! Built-in example patterns

/// A named pattern the user can load in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Preset {
    pub name: &'static str,
    pub pattern: &'static str,
}

pub const PRESETS: [Preset; 8] = [
    Preset {
        name: "Basic Beat",
        pattern: r#"s("bd sd hh sd")"#,
    },
    Preset {
        name: "Four on the Floor",
        pattern: "stack(\n  s(\"bd*4\"),\n  s(\"~ sd ~ sd\"),\n  s(\"hh*8\")\n)",
    },
    Preset {
        name: "Breakbeat",
        pattern: "stack(\n  s(\"bd ~ ~ bd ~ ~ bd ~\"),\n  s(\"~ ~ sd ~ ~ sd ~ sd\"),\n  s(\"hh*8\").gain(0.6)\n)",
    },
    Preset {
        name: "House",
        pattern: "stack(\n  s(\"bd*4\"),\n  s(\"~ cp ~ cp\"),\n  s(\"[~ hh]*8\").gain(0.5),\n  s(\"~ ~ ~ ~ ~ ~ oh ~\").gain(0.4)\n)",
    },
    Preset {
        name: "Synth Melody",
        pattern: "note(\"<c3 e3 g3 b3>*2\")\n  .sound(\"sawtooth\")\n  .lpf(800)\n  .decay(0.2)\n  .sustain(0)",
    },
    Preset {
        name: "Ambient",
        pattern: "note(\"<[c3,e3,g3] [d3,f3,a3] [e3,g3,b3] [f3,a3,c4]>/2\")\n  .sound(\"sine\")\n  .attack(0.5)\n  .decay(1)\n  .sustain(0.3)\n  .release(2)\n  .room(0.8)",
    },
    Preset {
        name: "Techno",
        pattern: "stack(\n  s(\"bd*4\").gain(1.2),\n  s(\"~ sd:1 ~ sd:1\"),\n  s(\"hh*16\").gain(0.3),\n  s(\"~ ~ ~ ~ oh ~ ~ ~\").gain(0.4)\n)",
    },
    Preset {
        name: "Polyrhythm",
        pattern: "stack(\n  s(\"bd(3,8)\"),\n  s(\"sd(5,8)\").gain(0.8),\n  s(\"hh(7,8)\").gain(0.5)\n)",
    },
];

/// Find a preset by case-insensitive name or by 1-based position
pub fn find(query: &str) -> Option<&'static Preset> {
    let query = query.trim();
    if let Ok(n) = query.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| PRESETS.get(i));
    }
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(query))
}
