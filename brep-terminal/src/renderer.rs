/// ASCII rasterizer for terminal rendering
use brep_core::{Camera, Light, Material, RenderableMesh, Scene};
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lighting gathered from the scene's light nodes.
#[derive(Debug, Clone, Copy)]
struct Lighting {
    ambient: [f32; 3],
    directional: [f32; 3],
    /// Unit vector pointing from surfaces towards the light.
    to_light: Vector3<f64>,
}

impl Lighting {
    fn from_scene(scene: &Scene) -> Self {
        let mut lighting = Self {
            ambient: [0.0; 3],
            directional: [0.0; 3],
            to_light: Vector3::z(),
        };
        for light in scene.lights() {
            match light {
                Light::Ambient { color } => add(&mut lighting.ambient, color.rgb_unit()),
                Light::Directional { color, direction } => {
                    add(&mut lighting.directional, color.rgb_unit());
                    if let Some(dir) = (-direction).try_normalize(f64::EPSILON) {
                        lighting.to_light = dir;
                    }
                }
            }
        }
        lighting
    }

    /// Shaded colour and brightness of a surface with unit normal `normal`.
    fn shade(&self, material: &Material, normal: &Vector3<f64>) -> [f32; 3] {
        let lambert = normal.dot(&self.to_light).max(0.0) as f32;
        let base = material.diffuse.rgb_unit();
        let mut color = [0.0; 3];
        for i in 0..3 {
            color[i] = base[i] * (self.ambient[i] + self.directional[i] * lambert);
        }
        if let Some(specular) = material.specular {
            let highlight = specular.color.alpha_unit() * lambert.powf(specular.power as f32);
            let tint = specular.color.rgb_unit();
            for i in 0..3 {
                color[i] += tint[i] * highlight;
            }
        }
        color.map(|c| c.clamp(0.0, 1.0))
    }
}

fn add(target: &mut [f32; 3], value: [f32; 3]) {
    for i in 0..3 {
        target[i] += value[i];
    }
}

fn luminance(color: &[f32; 3]) -> f32 {
    0.299 * color[0] + 0.587 * color[1] + 0.114 * color[2]
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    color_buffer: Vec<[f32; 3]>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            color_buffer: vec![[0.0; 3]; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.color_buffer.fill([0.0; 3]);
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Draw every mesh in scene order. Translucent meshes blend over what is
    /// already there, so the scene should be sorted back to front.
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        let lighting = Lighting::from_scene(scene);
        for mesh in scene.meshes() {
            self.render_mesh(mesh, camera, &lighting);
        }
    }

    fn render_mesh(&mut self, mesh: &RenderableMesh, camera: &Camera, lighting: &Lighting) {
        let world: Vec<Point3<f64>> = mesh
            .positions()
            .iter()
            .map(|p| mesh.transform().transform_point(p))
            .collect();

        for &[a, b, c] in mesh.triangles() {
            let (pa, pb, pc) = (world[a], world[b], world[c]);
            let Some(normal) = (pb - pa).cross(&(pc - pa)).try_normalize(f64::EPSILON) else {
                continue;
            };

            // Front material when the triangle faces the camera
            let facing = normal.dot(&(camera.position - pa)) > 0.0;
            let (material, normal) = if facing {
                (mesh.front, normal)
            } else {
                match mesh.back {
                    Some(back) => (back, -normal),
                    None => continue,
                }
            };

            let color = lighting.shade(&material, &normal);
            self.render_triangle([pa, pb, pc], camera, color, material.diffuse.alpha_unit());
        }
    }

    fn render_triangle(
        &mut self,
        vertices: [Point3<f64>; 3],
        camera: &Camera,
        color: [f32; 3],
        alpha: f32,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&vertices) {
            match camera.project_to_screen(vertex, self.width as u32, self.height as u32) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        self.rasterize_triangle(&screen_coords, color, alpha);
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64); 3], color: [f32; 3], alpha: f32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        let opaque = alpha >= 1.0;

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                // Barycentric coordinates
                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Interpolate depth
                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                let shaded = if opaque {
                    self.depth_buffer[idx] = depth;
                    color
                } else {
                    let under = self.color_buffer[idx];
                    let mut blended = [0.0; 3];
                    for i in 0..3 {
                        blended[i] = color[i] * alpha + under[i] * (1.0 - alpha);
                    }
                    blended
                };
                self.color_buffer[idx] = shaded;
                self.char_buffer[idx] = ramp_char(luminance(&shaded));
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let [r, g, b] = self.color_buffer[idx].map(|c| (c * 255.0) as u8);
                writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a lit cell; never blank so faint surfaces stay visible.
fn ramp_char(luminance: f32) -> char {
    let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
    let index = 1 + (luminance.clamp(0.0, 1.0) * steps).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
