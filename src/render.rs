use web_sys as web;

mod helpers;
mod skills;
mod surface;

pub use skills::SkillsScene3d;
pub use surface::HeroSurfaceScene;

// ===================== WebGPU state, one per scene canvas =====================

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: Option<(wgpu::Texture, wgpu::TextureView)>,
    with_depth: bool,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, with_depth: bool) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // scenes sit over page content, so keep the canvas see-through
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = with_depth.then(|| {
            helpers::create_depth_texture(&device, "scene_depth", width, height, DEPTH_FORMAT)
        });
        log::info!("[gpu] surface {width}x{height} {format:?} alpha={alpha_mode:?}");
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            with_depth,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref().map(|(_, v)| v)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        if self.with_depth {
            if let Some((old, _)) = self.depth.take() {
                old.destroy();
            }
            self.depth = Some(helpers::create_depth_texture(
                &self.device,
                "scene_depth",
                width,
                height,
                DEPTH_FORMAT,
            ));
        }
        log::debug!("[gpu] resized to {width}x{height}");
    }

    /// Acquire the next frame; a lost or outdated surface is reconfigured and
    /// the frame skipped.
    pub fn acquire(&mut self) -> Option<(wgpu::SurfaceTexture, wgpu::TextureView)> {
        match self.surface.get_current_texture() {
            Ok(frame) => {
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some((frame, view))
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(e) => {
                log::trace!("[gpu] frame skipped: {e:?}");
                None
            }
        }
    }

    pub fn release(&mut self) {
        if let Some((tex, _)) = self.depth.take() {
            tex.destroy();
        }
        self.device.destroy();
    }
}

/// Size a scene canvas to its container at a capped pixel ratio.
pub fn fit_scene_canvas(
    canvas: &web::HtmlCanvasElement,
    container: &web::Element,
    dpr: f64,
) -> signal_core::Viewport {
    let rect = container.get_bounding_client_rect();
    let viewport = signal_core::Viewport::new(
        rect.width(),
        rect.height(),
        dpr.min(crate::constants::MAX_SCENE_DPR),
    );
    let (w, h) = viewport.backing_size();
    canvas.set_width(w.max(1));
    canvas.set_height(h.max(1));
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    viewport
}
