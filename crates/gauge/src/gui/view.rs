use cairo::Context;
use dialgauge::{Color, DialShape, Scene};
use std::f64::consts::{FRAC_PI_2, PI};

struct DialRenderer<'a> {
    shape: &'a DialShape,
    fill: Color,
}

impl<'a> DialRenderer<'a> {
    fn new(shape: &'a DialShape, fill: Color) -> Self {
        Self { shape, fill }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (r, g, b, a) = self.fill.components();

        cr.save()?;
        // local space: dial centered on the origin, width along the radius
        cr.translate(self.shape.center.x, self.shape.center.y);
        cr.rotate(self.shape.rotation);
        self.trace_pill(cr);
        cr.set_source_rgba(r, g, b, a);
        cr.fill()?;
        cr.restore()
    }

    fn trace_pill(&self, cr: &Context) {
        let (w, h) = (self.shape.size.width, self.shape.size.height);
        let radius = self.shape.corner_radius.min(w / 2.0).min(h / 2.0);
        let (left, top, right, bottom) = (-w / 2.0, -h / 2.0, w / 2.0, h / 2.0);

        cr.new_sub_path();
        cr.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
        cr.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        cr.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
        cr.arc(left + radius, top + radius, radius, PI, 3.0 * FRAC_PI_2);
        cr.close_path();
    }
}

/// Paints every dial of `scene` with the color it shows right now.
pub fn draw(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    for (shape, fill) in scene.draw_list() {
        DialRenderer::new(shape, fill).draw(cr)?;
    }
    Ok(())
}
