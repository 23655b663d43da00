//! WGSL for the two instanced pipelines.
//!
//! Both draw one six-vertex quad per instance, positioned in pixel space and
//! converted to clip space with the viewport uniform. Edges are antialiased in
//! the fragment shader, so no MSAA target is needed.

/// Viewport uniform and helpers shared by both shaders.
const PRELUDE: &str = r#"
struct Viewport {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> viewport: Viewport;

// Pixels (origin top-left, y down) to clip space.
fn to_clip(p: vec2<f32>) -> vec4<f32> {
    let ndc = p / viewport.size * 2.0 - vec2<f32>(1.0, 1.0);
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}

fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    return corners[index];
}
"#;

const CIRCLE_BODY: &str = r#"
struct CircleInstance {
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
};

struct CircleVarying {
    @builtin(position) clip: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_circle(@builtin(vertex_index) vertex_index: u32, instance: CircleInstance) -> CircleVarying {
    // One pixel of slack for the antialiased rim
    let extent = instance.radius + 1.0;
    let local = quad_corner(vertex_index) * extent;

    var out: CircleVarying;
    out.clip = to_clip(instance.center + local);
    out.local = local;
    out.radius = instance.radius;
    out.color = instance.color;
    return out;
}

@fragment
fn fs_circle(v: CircleVarying) -> @location(0) vec4<f32> {
    let coverage = clamp(v.radius + 0.5 - length(v.local), 0.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(v.color.rgb, v.color.a * coverage);
}
"#;

const LINE_BODY: &str = r#"
struct LineInstance {
    @location(0) start: vec2<f32>,
    @location(1) end: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) width: f32,
};

struct LineVarying {
    @builtin(position) clip: vec4<f32>,
    @location(0) across: f32,
    @location(1) half_width: f32,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_line(@builtin(vertex_index) vertex_index: u32, instance: LineInstance) -> LineVarying {
    let corner = quad_corner(vertex_index);

    let delta = instance.end - instance.start;
    let len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if len > 0.0001 {
        dir = delta / len;
    }
    let normal = vec2<f32>(-dir.y, dir.x);

    // Hairlines are drawn one pixel wide with proportionally less alpha
    let half_width = max(instance.width, 1.0) * 0.5;
    let extent = half_width + 1.0;
    let t = corner.x * 0.5 + 0.5;
    let p = instance.start + delta * t + normal * corner.y * extent;

    var out: LineVarying;
    out.clip = to_clip(p);
    out.across = corner.y * extent;
    out.half_width = half_width;
    out.color = vec4<f32>(instance.color.rgb, instance.color.a * min(instance.width, 1.0));
    return out;
}

@fragment
fn fs_line(v: LineVarying) -> @location(0) vec4<f32> {
    let coverage = clamp(v.half_width + 0.5 - abs(v.across), 0.0, 1.0);
    if coverage <= 0.0 {
        discard;
    }
    return vec4<f32>(v.color.rgb, v.color.a * coverage);
}
"#;

/// Filled, antialiased circles. Entry points `vs_circle` / `fs_circle`.
pub fn circle_shader() -> String {
    format!("{}{}", PRELUDE, CIRCLE_BODY)
}

/// Antialiased line segments. Entry points `vs_line` / `fs_line`.
pub fn line_shader() -> String {
    format!("{}{}", PRELUDE, LINE_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_wgsl(source: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| format!("Parse error: {}", e.emit_to_string(source)))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );

        validator
            .validate(&module)
            .map_err(|e| format!("Validation error: {:?}", e))?;

        Ok(())
    }

    fn entry_points(source: &str) -> Vec<String> {
        let mut names: Vec<String> = naga::front::wgsl::parse_str(source)
            .unwrap()
            .entry_points
            .iter()
            .map(|ep| ep.name.clone())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_circle_shader_validates() {
        let source = circle_shader();
        if let Err(e) = validate_wgsl(&source) {
            panic!("circle shader failed:\n{}", e);
        }
        assert_eq!(entry_points(&source), vec!["fs_circle", "vs_circle"]);
    }

    #[test]
    fn test_line_shader_validates() {
        let source = line_shader();
        if let Err(e) = validate_wgsl(&source) {
            panic!("line shader failed:\n{}", e);
        }
        assert_eq!(entry_points(&source), vec!["fs_line", "vs_line"]);
    }
}
