//! Compositor: setzt einen Frame aus Hintergrund, Layern, Spezial-Layern,
//! Pinsel-Vorschau, Grid und Koordinaten zusammen.
//!
//! Reihenfolge:
//! 1. Hintergrund im Clip füllen
//! 2. Reguläre Layer (rekursiv, Gruppen-Deckkraft multipliziert sich)
//! 3. Spezial-Layer und Pinsel-Vorschau (außer im Modus `NoSpecialLayers`)
//! 4. Grid
//! 5. Koordinaten-Labels
//! 6. Property-Flags

use image::Rgba;
use tile_raster::{Composite, Surface};

use super::projection::ViewContext;
use super::MapView;
use crate::core::{LayerContent, MapLayer};
use crate::shared::SELECTION_HIGHLIGHT_ALPHA;

/// Composite-Modus für eine effektive Layer-Deckkraft.
pub fn composite_for_opacity(opacity: f32) -> Composite {
    if opacity >= 1.0 {
        Composite::SrcOver
    } else {
        Composite::SrcAtop(opacity)
    }
}

/// Composite-Modus für das Grid (Deckkraft 0–255 linear).
pub fn composite_for_grid(opacity: u8) -> Composite {
    if opacity < u8::MAX {
        Composite::SrcAtop(opacity as f32 / 255.0)
    } else {
        Composite::SrcOver
    }
}

/// Zeichnet einen vollständigen Frame in den aktuellen Clip der Fläche.
pub(crate) fn render(view: &MapView, surface: &mut Surface) {
    let clip = surface.clip();
    let ctx = view.context();
    let projection = view.projection();
    let state = view.state();
    log::debug!(
        "Frame: {} Clip {}x{}+{}+{} Zoom {}",
        projection.orientation(),
        clip.width,
        clip.height,
        clip.x,
        clip.y,
        ctx.zoom
    );
    if clip.is_empty() {
        return;
    }
    let saved_antialias = surface.antialias();

    surface.set_composite(Composite::SrcOver);
    surface.set_color(Rgba(view.options().background_color));
    surface.fill_rect(clip.x, clip.y, clip.width, clip.height);

    paint_sub_map(view, surface, &ctx, &ctx.map.layers, 1.0);

    if !state.modes.no_special_layers {
        for layer in ctx.map.special_layers.iter().filter(|l| l.props.visible) {
            paint_special_layer(view, surface, &ctx, layer);
        }
        if let Some(brush) = view.brush() {
            surface.set_composite(Composite::SrcOver);
            brush.draw_preview(surface, view);
        }
    }

    // Grid-Farbe gilt auch für die Koordinaten
    surface.set_color(state.grid.color);

    if state.grid.visible {
        surface.set_composite(composite_for_grid(state.grid.opacity));
        surface.set_antialias(state.grid.antialias);
        projection.paint_grid(surface, &ctx);
    }

    if state.modes.show_coordinates {
        surface.set_composite(Composite::SrcOver);
        projection.paint_coordinates(surface, &ctx);
    }

    if state.modes.show_property_flags {
        paint_property_flags(view, surface, &ctx);
    }

    surface.set_composite(Composite::SrcOver);
    surface.set_antialias(saved_antialias);
}

/// Zeichnet einen Layer-Stapel; `inherited_opacity` ist die Deckkraft der umgebenden Gruppe.
fn paint_sub_map(
    view: &MapView,
    surface: &mut Surface,
    ctx: &ViewContext,
    layers: &[MapLayer],
    inherited_opacity: f32,
) {
    for layer in layers {
        let opacity = layer.props.opacity * inherited_opacity;
        if !layer.props.visible || opacity <= 0.0 {
            continue;
        }
        if let LayerContent::Group(children) = &layer.content {
            paint_sub_map(view, surface, ctx, children, opacity);
            continue;
        }
        surface.set_composite(match &layer.content {
            LayerContent::Selection(_) => Composite::SrcAtop(SELECTION_HIGHLIGHT_ALPHA * opacity),
            _ => composite_for_opacity(opacity),
        });
        paint_content(view, surface, ctx, layer);
    }
}

/// Spezial-Layer: Selektionen mit fester Highlight-Deckkraft, alles andere wie regulär.
fn paint_special_layer(view: &MapView, surface: &mut Surface, ctx: &ViewContext, layer: &MapLayer) {
    match &layer.content {
        LayerContent::Selection(_) => {
            surface.set_composite(Composite::SrcAtop(SELECTION_HIGHLIGHT_ALPHA));
            paint_content(view, surface, ctx, layer);
        }
        LayerContent::Group(children) => {
            paint_sub_map(view, surface, ctx, children, layer.props.opacity);
        }
        _ => {
            if layer.props.opacity <= 0.0 {
                return;
            }
            surface.set_composite(composite_for_opacity(layer.props.opacity));
            paint_content(view, surface, ctx, layer);
        }
    }
}

/// Verteilt einen Layer an die Zeichenmethode seines Typs.
///
/// Nicht zeichenbare Typen werden übersprungen (im strikten Modus mit Warnung).
fn paint_content(
    view: &MapView,
    surface: &mut Surface,
    ctx: &ViewContext,
    layer: &MapLayer,
) {
    let projection = view.projection();
    match &layer.content {
        LayerContent::Tiles(grid) => projection.paint_layer(surface, ctx, &layer.props, grid),
        LayerContent::Objects(group) => {
            projection.paint_object_group(surface, ctx, &layer.props, group)
        }
        LayerContent::Selection(area) => {
            projection.paint_selection(surface, ctx, &layer.props, area)
        }
        LayerContent::Group(children) => {
            paint_sub_map(view, surface, ctx, children, layer.props.opacity)
        }
        LayerContent::Unsupported { kind } => {
            if view.options().strict_layer_types {
                log::warn!(
                    "Layer '{}' übersprungen: Typ '{}' kann nicht gezeichnet werden",
                    layer.name,
                    kind
                );
            } else {
                log::debug!("Layer '{}' (Typ '{}') übersprungen", layer.name, kind);
            }
        }
    }
}

/// Property-Flags auf dem aktuellen, sichtbaren Tile-Layer.
fn paint_property_flags(view: &MapView, surface: &mut Surface, ctx: &ViewContext) {
    let Some(icon) = view.resources().property_flag.as_ref() else {
        return;
    };
    let Some(layer) = ctx.current_layer else {
        return;
    };
    let LayerContent::Tiles(grid) = &layer.content else {
        return;
    };
    if !layer.props.visible {
        return;
    }
    surface.set_composite(Composite::SrcOver);
    view.projection()
        .paint_property_flags(surface, ctx, &layer.props, grid, icon);
}
