use vista_core::raster::RasterBuffer;

/// Upload-ready copy of an RGBA raster.
pub fn raster_to_color_image(raster: &RasterBuffer) -> egui::ColorImage {
    let size = [raster.width() as usize, raster.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, raster.as_raw())
}
