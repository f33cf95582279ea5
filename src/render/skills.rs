use signal_core::canvas::{Renderer, Viewport};
use signal_core::scene::skills::{unit_box, BarInstance, BoxVertex, LineVertex, SkillsFrame};
use signal_core::scene::{EntranceConfig, GpuResource, Release, SkillsScene, SKILLS};
use signal_core::Palette;
use wasm_bindgen::JsCast;
use web_sys as web;

use super::helpers::{self, PipelineDesc, UniformBinding};
use super::GpuState;
use crate::constants::{FFT_HINT_ID, HIDDEN_CLASS, SKILLS_SEED};

struct SkillsGpu {
    gpu: GpuState,
    uniforms: UniformBinding,
    glass_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    box_vertices: wgpu::Buffer,
    box_triangles: wgpu::Buffer,
    box_edges: wgpu::Buffer,
    triangle_count: u32,
    edge_count: u32,
    instances: wgpu::Buffer,
    instance_capacity: usize,
    lines: wgpu::Buffer,
    line_count: u32,
}

impl Release for SkillsGpu {
    fn release(&mut self) {
        for b in [
            &self.uniforms.buffer,
            &self.box_vertices,
            &self.box_triangles,
            &self.box_edges,
            &self.instances,
            &self.lines,
        ] {
            b.destroy();
        }
        self.gpu.release();
        log::info!("[skills] GPU resources released");
    }
}

impl SkillsGpu {
    fn new(gpu: GpuState, scene: &SkillsScene) -> Self {
        let device = gpu.device();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skills_shader"),
            source: wgpu::ShaderSource::Wgsl(signal_core::SKILLS_WGSL.into()),
        });
        let uniforms = helpers::uniform_binding(device, "skills_uniforms", &scene.uniforms());
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skills_pl"),
            bind_group_layouts: &[&uniforms.layout],
            push_constant_ranges: &[],
        });

        let bar_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BoxVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BarInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4],
            },
        ];
        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32],
        }];

        let glass_pipeline = helpers::make_scene_pipeline(
            device,
            &layout,
            &shader,
            gpu.format(),
            PipelineDesc {
                label: "skills_glass",
                vs_entry: "vs_bar",
                fs_entry: "fs_glass",
                buffers: &bar_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: Some(true),
            },
        );
        let edge_pipeline = helpers::make_scene_pipeline(
            device,
            &layout,
            &shader,
            gpu.format(),
            PipelineDesc {
                label: "skills_edges",
                vs_entry: "vs_bar",
                fs_entry: "fs_edge",
                buffers: &bar_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: Some(false),
            },
        );
        let line_pipeline = helpers::make_scene_pipeline(
            device,
            &layout,
            &shader,
            gpu.format(),
            PipelineDesc {
                label: "skills_lines",
                vs_entry: "vs_line",
                fs_entry: "fs_line",
                buffers: &line_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: Some(false),
            },
        );

        let (vertices, triangles, edges) = unit_box();
        let instance_capacity = (scene.peaks().len() + scene.noise_bars().len()).max(1);
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("skills_instances"),
            size: (instance_capacity * std::mem::size_of::<BarInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let static_lines = scene.static_lines();
        log::info!(
            "[skills] created: {} peaks, {} noise bars, {} grid/axis segments",
            scene.peaks().len(),
            scene.noise_bars().len(),
            static_lines.len() / 2
        );
        Self {
            box_vertices: helpers::vertex_buffer(device, "skills_box", &vertices),
            box_triangles: helpers::index_buffer(device, "skills_box_tris", &triangles),
            box_edges: helpers::index_buffer(device, "skills_box_edges", &edges),
            triangle_count: triangles.len() as u32,
            edge_count: edges.len() as u32,
            instances,
            instance_capacity,
            lines: helpers::vertex_buffer(device, "skills_lines", &static_lines),
            line_count: static_lines.len() as u32,
            gpu,
            uniforms,
            glass_pipeline,
            edge_pipeline,
            line_pipeline,
        }
    }

    fn draw(&mut self, scene: &SkillsScene, frame: &SkillsFrame) {
        let mut bars: Vec<BarInstance> = Vec::with_capacity(self.instance_capacity);
        bars.extend_from_slice(&frame.peaks);
        bars.extend_from_slice(&frame.noise);
        bars.truncate(self.instance_capacity);
        let peak_count = frame.peaks.len().min(bars.len()) as u32;

        let queue = self.gpu.queue();
        queue.write_buffer(&self.uniforms.buffer, 0, bytemuck::bytes_of(&scene.uniforms()));
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&bars));

        let Some((surface_frame, view)) = self.gpu.acquire() else {
            return;
        };
        let Some(depth_view) = self.gpu.depth_view() else {
            return;
        };
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("skills_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("skills_pass"),
                color_attachments: &[Some(helpers::transparent_pass_color(&view))],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.uniforms.bind_group, &[]);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.lines.slice(..));
            rpass.draw(0..self.line_count, 0..1);

            rpass.set_vertex_buffer(0, self.box_vertices.slice(..));
            rpass.set_vertex_buffer(1, self.instances.slice(..));
            rpass.set_pipeline(&self.glass_pipeline);
            rpass.set_index_buffer(self.box_triangles.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.triangle_count, 0, 0..bars.len() as u32);

            // outlines on the skill peaks only
            rpass.set_pipeline(&self.edge_pipeline);
            rpass.set_index_buffer(self.box_edges.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.edge_count, 0, 0..peak_count);
        }
        self.gpu.queue().submit(Some(encoder.finish()));
        surface_frame.present();
    }
}

/// Projected HTML labels layered over the spectrum canvas.
struct LabelLayer {
    peaks: Vec<web::HtmlElement>,
    ticks: Vec<web::HtmlElement>,
    x_axis: Option<web::HtmlElement>,
}

impl LabelLayer {
    fn build(document: &web::Document, root: Option<&web::Element>, scene: &SkillsScene) -> Self {
        let mut layer = Self {
            peaks: Vec::new(),
            ticks: Vec::new(),
            x_axis: None,
        };
        let Some(root) = root else {
            return layer;
        };
        let make = |tag: &str, class: &str, html: &str| -> Option<web::HtmlElement> {
            let el = document.create_element(tag).ok()?;
            el.set_class_name(class);
            el.set_inner_html(html);
            root.append_child(&el).ok()?;
            el.dyn_into::<web::HtmlElement>().ok()
        };
        for peak in scene.peaks() {
            let s = &peak.skill;
            let html = format!(
                "<span class=\"fft-label__name\">{}</span><span class=\"fft-label__detail\">{}</span><span class=\"fft-label__pct\">{:.1} dB</span>",
                s.name,
                s.detail,
                s.proficiency * 10.0
            );
            layer.peaks.extend(make("div", "fft-label", &html));
        }
        for db in signal_core::scene::skills::DB_TICKS {
            layer
                .ticks
                .extend(make("span", "fft-axis-tick", &format!("{db} dB")));
        }
        layer.x_axis = make(
            "span",
            "fft-axis-xlabel",
            "Skill Domain &nbsp;<span style=\"font-size:1.1em\">&#x2192;</span>",
        );
        layer
    }

    fn update(&self, frame: &SkillsFrame) {
        for (el, label) in self.peaks.iter().zip(&frame.labels) {
            let style = el.style();
            _ = style.set_property(
                "transform",
                &format!(
                    "translate(-50%, -100%) translate({}px, {}px)",
                    label.screen.x, label.screen.y
                ),
            );
            _ = style.set_property("opacity", &label.opacity.to_string());
        }
        for (el, tick) in self.ticks.iter().zip(&frame.ticks) {
            _ = el.style().set_property(
                "transform",
                &format!(
                    "translate(-100%, -50%) translate({:.1}px, {:.1}px)",
                    tick.screen.x, tick.screen.y
                ),
            );
        }
        if let (Some(el), Some(axis)) = (&self.x_axis, &frame.x_axis) {
            _ = el.style().set_property(
                "transform",
                &format!(
                    "translate(-50%, 4px) translate({:.1}px, {:.1}px)",
                    axis.screen.x, axis.screen.y
                ),
            );
        }
    }
}

/// Skills spectrum: GPU bars plus DOM labels.
pub struct SkillsScene3d {
    canvas: web::HtmlCanvasElement,
    container: web::Element,
    scene: SkillsScene,
    labels: LabelLayer,
    gpu: GpuResource<SkillsGpu>,
}

impl SkillsScene3d {
    pub async fn new(
        document: &web::Document,
        canvas: web::HtmlCanvasElement,
        container: web::Element,
        labels_root: Option<web::Element>,
        dpr: f64,
        palette: &Palette,
    ) -> anyhow::Result<Self> {
        let mut scene = SkillsScene::new(&SKILLS, EntranceConfig::default(), SKILLS_SEED)?;
        scene.update_palette(palette);
        let viewport = super::fit_scene_canvas(&canvas, &container, dpr);
        scene.resize(viewport.width, viewport.height);
        let gpu = GpuState::new(&canvas, true).await?;
        let gpu = SkillsGpu::new(gpu, &scene);
        let labels = LabelLayer::build(document, labels_root.as_ref(), &scene);
        Ok(Self {
            canvas,
            container,
            scene,
            labels,
            gpu: GpuResource::new(gpu),
        })
    }

    /// Start the staggered bar reveal and retire the scroll hint.
    pub fn trigger_entrance(&mut self, now_ms: f64) {
        if !self.scene.trigger_entrance(now_ms) {
            return;
        }
        if let Some(hint) = crate::dom::window_document().and_then(|d| d.get_element_by_id(FFT_HINT_ID)) {
            _ = hint.class_list().add_1(HIDDEN_CLASS);
        }
    }

    pub fn refit(&mut self, dpr: f64) {
        let viewport = super::fit_scene_canvas(&self.canvas, &self.container, dpr);
        self.resize(viewport);
    }

    pub fn dispose(&mut self) -> bool {
        self.gpu.dispose()
    }
}

impl Renderer for SkillsScene3d {
    fn resize(&mut self, viewport: Viewport) {
        self.scene.resize(viewport.width, viewport.height);
        let (w, h) = viewport.backing_size();
        if let Some(gpu) = self.gpu.get_mut() {
            gpu.gpu.resize_if_needed(w, h);
        }
    }

    fn render(&mut self, time_ms: f64) {
        if self.gpu.is_disposed() {
            return;
        }
        let frame = self.scene.update(time_ms);
        self.labels.update(&frame);
        if let Some(gpu) = self.gpu.get_mut() {
            gpu.draw(&self.scene, &frame);
        }
    }

    fn update_palette(&mut self, palette: &Palette) {
        self.scene.update_palette(palette);
    }
}
