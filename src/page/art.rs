// Inline SVG artwork: iris head, iris on a stem, and the falling seed.
// Gradients live in one hidden <svg> per document (see `defs_svg`) and are
// referenced by id from every flower.

/// (offset percent, color)
pub type Stop = (u8, &'static str);

pub const IRIS_OUTER_STOPS: &[Stop] = &[(0, "#5D3FD3"), (60, "#310062"), (100, "#1a0033")];
pub const IRIS_INNER_STOPS: &[Stop] = &[(0, "#8A2BE2"), (100, "#9370DB")];
pub const IRIS_ACCENT_STOPS: &[Stop] = &[(0, "#FFD700"), (100, "#FFA500")];
pub const STEM_STOPS: &[Stop] = &[(0, "#228B22"), (100, "#32CD32")];
pub const SEED_STOPS: &[Stop] = &[(0, "#F5E6C8"), (60, "#C8A46A"), (100, "#7A5A2B")];

/// Every named palette, for validation.
pub const PALETTES: &[(&str, &[Stop])] = &[
    ("irisOuterGrad", IRIS_OUTER_STOPS),
    ("irisInnerGrad", IRIS_INNER_STOPS),
    ("irisAccentGrad", IRIS_ACCENT_STOPS),
    ("stemGrad", STEM_STOPS),
    ("seedGrad", SEED_STOPS),
];

const OUTER_PETAL: &str = "M50 50 Q 20 85 50 120 Q 80 85 50 50 Z";
const INNER_PETAL: &str = "M50 50 Q 35 15 50 -10 Q 65 15 50 50 Z";
const OUTER_ANGLES: [u16; 3] = [0, 120, 240];
const INNER_ANGLES: [u16; 3] = [60, 180, 300];

fn stops(list: &[Stop]) -> String {
    list.iter()
        .map(|(offset, color)| format!("<stop offset=\"{offset}%\" stop-color=\"{color}\"/>"))
        .collect()
}

/// Hidden zero-size svg holding the shared gradients and glow filter.
pub fn defs_svg() -> String {
    format!(
        concat!(
            "<svg width=\"0\" height=\"0\" style=\"position:absolute\" aria-hidden=\"true\"><defs>",
            "<radialGradient id=\"irisOuterGrad\" cx=\"50%\" cy=\"50%\" r=\"70%\" fx=\"50%\" fy=\"20%\">{}</radialGradient>",
            "<linearGradient id=\"irisInnerGrad\" x1=\"0%\" y1=\"100%\" x2=\"0%\" y2=\"0%\">{}</linearGradient>",
            "<radialGradient id=\"irisAccentGrad\" cx=\"50%\" cy=\"50%\" r=\"50%\">{}</radialGradient>",
            "<linearGradient id=\"stemGrad\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">{}</linearGradient>",
            "<radialGradient id=\"seedGrad\" cx=\"35%\" cy=\"30%\" r=\"70%\">{}</radialGradient>",
            "<filter id=\"glow\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\">",
            "<feGaussianBlur stdDeviation=\"2\" result=\"coloredBlur\"/>",
            "<feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>",
            "</filter></defs></svg>"
        ),
        stops(IRIS_OUTER_STOPS),
        stops(IRIS_INNER_STOPS),
        stops(IRIS_ACCENT_STOPS),
        stops(STEM_STOPS),
        stops(SEED_STOPS),
    )
}

// Petals and centre without an enclosing <svg>, in a 100x120 box.
fn iris_head_group() -> String {
    let mut out = String::from("<g filter=\"url(#glow)\">");
    for angle in OUTER_ANGLES {
        out.push_str(&format!(
            "<g transform=\"rotate({angle} 50 50)\"><path d=\"{OUTER_PETAL}\" fill=\"url(#irisOuterGrad)\" stroke=\"rgba(0,0,0,0.2)\" stroke-width=\"0.5\"/><ellipse cx=\"50\" cy=\"80\" rx=\"4\" ry=\"15\" fill=\"url(#irisAccentGrad)\" opacity=\"0.9\"/></g>"
        ));
    }
    for angle in INNER_ANGLES {
        out.push_str(&format!(
            "<g transform=\"rotate({angle} 50 50)\"><path d=\"{INNER_PETAL}\" fill=\"url(#irisInnerGrad)\" opacity=\"0.95\" stroke=\"rgba(255,255,255,0.1)\" stroke-width=\"0.5\"/></g>"
        ));
    }
    out.push_str("<circle cx=\"50\" cy=\"50\" r=\"6\" fill=\"url(#irisAccentGrad)\" opacity=\"0.8\"/></g>");
    out
}

pub fn iris_head(class: &str) -> String {
    format!(
        "<svg viewBox=\"0 0 100 120\" class=\"{class}\" style=\"overflow:visible\">{}</svg>",
        iris_head_group()
    )
}

pub fn iris_with_stem() -> String {
    format!(
        concat!(
            "<svg viewBox=\"0 0 100 250\" style=\"overflow:visible;width:100%;height:100%\">",
            "<g>",
            "<path d=\"M50 250 Q 55 150 50 60\" stroke=\"url(#stemGrad)\" stroke-width=\"5\" fill=\"none\" stroke-linecap=\"round\"/>",
            "<path d=\"M50 180 Q 20 170 30 200 Q 40 210 50 190\" fill=\"#228B22\"/>",
            "<path d=\"M50 180 Q 35 185 30 200\" stroke=\"#1a6b1a\" stroke-width=\"1\" fill=\"none\"/>",
            "<path d=\"M52 120 Q 80 110 75 140 Q 65 150 52 130\" fill=\"#32CD32\"/>",
            "<path d=\"M52 120 Q 67 125 75 140\" stroke=\"#228B22\" stroke-width=\"1\" fill=\"none\"/>",
            "</g>",
            "<g transform=\"scale(0.9)\">{}</g>",
            "</svg>"
        ),
        iris_head_group()
    )
}

pub fn seed() -> String {
    concat!(
        "<svg viewBox=\"0 0 100 100\" style=\"width:80px;height:80px\">",
        "<ellipse cx=\"50\" cy=\"52\" rx=\"18\" ry=\"24\" fill=\"url(#seedGrad)\"/>",
        "<path d=\"M50 30 Q 44 52 50 76 Q 56 52 50 30 Z\" fill=\"rgba(255,255,255,0.14)\"/>",
        "</svg>"
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defs_declare_every_palette_once() {
        let defs = defs_svg();
        for (id, list) in PALETTES {
            assert_eq!(defs.matches(&format!("id=\"{id}\"")).count(), 1, "{id}");
            for (_, color) in *list {
                assert!(defs.contains(color), "{id} missing {color}");
            }
        }
        assert!(defs.contains("id=\"glow\""));
    }

    #[test]
    fn iris_has_six_petals() {
        let head = iris_head("icon");
        assert_eq!(head.matches("url(#irisOuterGrad)").count(), 3);
        assert_eq!(head.matches("url(#irisInnerGrad)").count(), 3);
        assert!(head.contains("class=\"icon\""));
    }

    #[test]
    fn flowers_reference_shared_defs_only() {
        let flower = iris_with_stem();
        assert!(flower.contains("url(#stemGrad)"));
        assert!(!flower.contains("<defs>"));
    }
}
