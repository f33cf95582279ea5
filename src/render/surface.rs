use signal_core::canvas::{Renderer, Viewport};
use signal_core::scene::surface::{
    build_plane, PlaneMesh, SurfaceVertex, PLANE_DEPTH, PLANE_WIDTH, SOLID_SEGMENTS, WIRE_SEGMENTS,
};
use signal_core::scene::{GpuResource, HeroSurfaceState, Release};
use signal_core::Palette;
use web_sys as web;

use super::helpers::{self, PipelineDesc, UniformBinding};
use super::GpuState;

struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &PlaneMesh, indices: &[u32]) -> Self {
        Self {
            vertices: helpers::vertex_buffer(device, label, &mesh.vertices),
            indices: helpers::index_buffer(device, label, indices),
            count: indices.len() as u32,
        }
    }

    fn destroy(&self) {
        self.vertices.destroy();
        self.indices.destroy();
    }
}

struct SurfaceGpu {
    gpu: GpuState,
    uniforms: UniformBinding,
    solid_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    solid: MeshBuffers,
    wire: MeshBuffers,
}

impl Release for SurfaceGpu {
    fn release(&mut self) {
        self.solid.destroy();
        self.wire.destroy();
        self.uniforms.buffer.destroy();
        self.gpu.release();
        log::info!("[surface] GPU resources released");
    }
}

impl SurfaceGpu {
    fn new(gpu: GpuState, state: &HeroSurfaceState) -> anyhow::Result<Self> {
        let device = gpu.device();
        let (sx, sz) = SOLID_SEGMENTS;
        let (wx, wz) = WIRE_SEGMENTS;
        let solid_mesh = build_plane(PLANE_WIDTH, PLANE_DEPTH, sx, sz)?;
        let wire_mesh = build_plane(PLANE_WIDTH, PLANE_DEPTH, wx, wz)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hero_surface_shader"),
            source: wgpu::ShaderSource::Wgsl(signal_core::HERO_SURFACE_WGSL.into()),
        });
        let uniforms = helpers::uniform_binding(device, "hero_surface_uniforms", &state.uniforms());
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("hero_surface_pl"),
            bind_group_layouts: &[&uniforms.layout],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
        };
        let buffers = [vertex_layout];
        let solid_pipeline = helpers::make_scene_pipeline(
            device,
            &layout,
            &shader,
            gpu.format(),
            PipelineDesc {
                label: "hero_surface_solid",
                vs_entry: "vs_main",
                fs_entry: "fs_surface",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: None,
            },
        );
        let wire_pipeline = helpers::make_scene_pipeline(
            device,
            &layout,
            &shader,
            gpu.format(),
            PipelineDesc {
                label: "hero_surface_wire",
                vs_entry: "vs_main",
                fs_entry: "fs_wire",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: None,
            },
        );
        let solid = MeshBuffers::new(device, "hero_surface_solid", &solid_mesh, &solid_mesh.triangles);
        let wire = MeshBuffers::new(device, "hero_surface_wire", &wire_mesh, &wire_mesh.lines);
        log::info!(
            "[surface] created: {} solid tris, {} wire edges",
            solid.count / 3,
            wire.count / 2
        );
        Ok(Self {
            gpu,
            uniforms,
            solid_pipeline,
            wire_pipeline,
            solid,
            wire,
        })
    }

    fn draw(&mut self, uniforms: &signal_core::scene::SurfaceUniforms) {
        self.gpu
            .queue()
            .write_buffer(&self.uniforms.buffer, 0, bytemuck::bytes_of(uniforms));
        let Some((frame, view)) = self.gpu.acquire() else {
            return;
        };
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_surface_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_surface_pass"),
                color_attachments: &[Some(helpers::transparent_pass_color(&view))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.uniforms.bind_group, &[]);
            for (pipeline, mesh) in [
                (&self.solid_pipeline, &self.solid),
                (&self.wire_pipeline, &self.wire),
            ] {
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.count, 0, 0..1);
            }
        }
        self.gpu.queue().submit(Some(encoder.finish()));
        frame.present();
    }
}

/// The AM "signal topology" behind the about section.
pub struct HeroSurfaceScene {
    canvas: web::HtmlCanvasElement,
    container: web::Element,
    state: HeroSurfaceState,
    gpu: GpuResource<SurfaceGpu>,
}

impl HeroSurfaceScene {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        container: web::Element,
        dpr: f64,
        palette: &Palette,
    ) -> anyhow::Result<Self> {
        let viewport = super::fit_scene_canvas(&canvas, &container, dpr);
        let mut state = HeroSurfaceState::default();
        state.update_palette(palette);
        state.resize(viewport.width, viewport.height);
        let gpu = GpuState::new(&canvas, false).await?;
        let gpu = SurfaceGpu::new(gpu, &state)?;
        Ok(Self {
            canvas,
            container,
            state,
            gpu: GpuResource::new(gpu),
        })
    }

    pub fn is_active(&self) -> bool {
        !self.gpu.is_disposed() && self.state.is_visible()
    }

    pub fn container(&self) -> &web::Element {
        &self.container
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.state.is_visible() {
            return;
        }
        self.state.set_visible(visible);
        _ = self
            .canvas
            .style()
            .set_property("display", if visible { "" } else { "none" });
    }

    pub fn update_pointer(&mut self, nx: f32, ny: f32) {
        self.state.update_pointer(nx, ny);
    }

    /// Re-measure the container and resize the drawing buffer to match.
    pub fn refit(&mut self, dpr: f64) {
        let viewport = super::fit_scene_canvas(&self.canvas, &self.container, dpr);
        self.resize(viewport);
    }

    pub fn dispose(&mut self) -> bool {
        let released = self.gpu.dispose();
        if released {
            self.set_visible(false);
        }
        released
    }
}

impl Renderer for HeroSurfaceScene {
    fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport.width, viewport.height);
        let (w, h) = viewport.backing_size();
        if let Some(gpu) = self.gpu.get_mut() {
            gpu.gpu.resize_if_needed(w, h);
        }
    }

    fn render(&mut self, time_ms: f64) {
        if !self.state.is_visible() {
            return;
        }
        let uniforms = self.state.update(time_ms);
        if let Some(gpu) = self.gpu.get_mut() {
            gpu.draw(&uniforms);
        }
    }

    fn update_palette(&mut self, palette: &Palette) {
        self.state.update_palette(palette);
    }
}
