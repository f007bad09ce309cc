mod editor;
mod preview;

use std::sync::{Arc, RwLock};

use crate::{args::CliArgs, error::RuntimeError};
use bxdf::MaterialParams;
use editor::MaterialEditor;
use preview::{MaterialPreview, PreviewResources};

/// Initial window width.
const WIN_INITIAL_WIDTH: f32 = 960.0;
/// Initial window height.
const WIN_INITIAL_HEIGHT: f32 = 540.0;

/// Launches the glimt GUI application.
pub fn run(args: &CliArgs) -> Result<(), RuntimeError> {
    let initial = MaterialParams::new(args.roughness, args.metallic);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("glimt")
            .with_inner_size(egui::vec2(WIN_INITIAL_WIDTH, WIN_INITIAL_HEIGHT)),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };
    eframe::run_native(
        "glimt",
        options,
        Box::new(move |cc| Ok(Box::new(GlimtApp::new(cc, initial)))),
    )
    .map_err(RuntimeError::from)
}

/// Glimt client application with GUI.
pub struct GlimtApp {
    /// The editor pane producing parameter updates.
    editor: MaterialEditor,
    /// The preview pane drawing the shaded quad.
    preview: MaterialPreview,
    /// Parameters applied to the preview; written by the editor's observer,
    /// read once per frame when composing the preview pass.
    params: Arc<RwLock<MaterialParams>>,
}

impl GlimtApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial: MaterialParams) -> Self {
        let params = Arc::new(RwLock::new(initial));

        let mut editor = MaterialEditor::new(initial);
        editor.set_observer({
            let params = params.clone();
            let ctx = cc.egui_ctx.clone();
            Box::new(move |updated| {
                *params.write().unwrap() = updated;
                ctx.request_repaint();
            })
        });

        // GPU resources for the preview are created once here and live in
        // the egui-wgpu callback resources until the render state is torn
        // down together with the surface.
        match cc.wgpu_render_state.as_ref() {
            Some(render_state) => {
                let resources =
                    PreviewResources::new(&render_state.device, render_state.target_format);
                render_state
                    .renderer
                    .write()
                    .callback_resources
                    .insert(resources);
            },
            None => {
                log::error!("wgpu render state is unavailable; the preview will stay blank");
            },
        }

        Self {
            editor,
            preview: MaterialPreview::default(),
            params,
        }
    }
}

impl eframe::App for GlimtApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("material_editor")
            .resizable(true)
            .default_width(WIN_INITIAL_WIDTH / 3.0)
            .show(ctx, |ui| self.editor.ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            let params = *self.params.read().unwrap();
            self.preview.ui(ui, params);
        });
    }
}
