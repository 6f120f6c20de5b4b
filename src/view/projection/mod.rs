//! Projektions-Strategien: Tile↔Screen-Transformationen und Zeichnen je Orientierung.
//!
//! Jede Orientierung implementiert nur ihre Geometrie (Vorwärts-/Rückwärts-
//! Transformation, Zellumriss, bevorzugte Größe). Das Zeichnen von Layern,
//! Grid, Koordinaten und Property-Flags ist als Default-Methode gemeinsam
//! und wird nur dort überschrieben, wo eine Orientierung es günstiger kann.

mod hex;
mod iso;
mod ortho;
mod shifted;

pub use hex::HexProjection;
pub use iso::IsoProjection;
pub use ortho::OrthoProjection;
pub use shifted::ShiftedProjection;

use glam::{DVec2, IVec2, Vec2};
use image::RgbaImage;
use tile_raster::{ClipRect, Polygon, Surface};

use crate::core::{LayerProps, MapLayer, ObjectGroup, Orientation, SelectionArea, TileGrid, TileMap};

use super::parallax::parallax_offset_zoomed;

/// Kantenlänge des Markers für Objekte ohne Ausdehnung (Screen-Pixel).
const OBJECT_MARKER_SIZE: i32 = 5;

/// Scroll-Achse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// Gemeinsamer Kontext für alle Projektions-Aufrufe eines Frames bzw. einer Abfrage.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    /// Die angezeigte Karte
    pub map: &'a TileMap,
    /// Aktueller Zoom-Faktor
    pub zoom: f64,
    /// View-Zentrum als Bruchteil der Karte (0.0–1.0)
    pub view_center: Vec2,
    /// Aktueller Layer (Referenz für Grid und Koordinaten)
    pub current_layer: Option<&'a MapLayer>,
}

impl ViewContext<'_> {
    /// Tile-Größe eines Layers in Screen-Pixeln (abgeschnitten, mindestens 1).
    pub fn zoomed_tile_size(&self, props: &LayerProps) -> IVec2 {
        IVec2::new(
            scale_length(props.tile_width, self.zoom),
            scale_length(props.tile_height, self.zoom),
        )
    }

    /// Tile-Größe der Karte in Screen-Pixeln.
    pub fn map_tile_size(&self) -> IVec2 {
        IVec2::new(
            scale_length(self.map.tile_width, self.zoom),
            scale_length(self.map.tile_height, self.zoom),
        )
    }

    /// Parallax-Versatz eines Layers in Screen-Pixeln.
    pub fn layer_offset(&self, props: &LayerProps) -> IVec2 {
        parallax_offset_zoomed(self.map, props, self.view_center, self.zoom)
    }

    /// Eigenschaften, an denen sich Grid und Koordinaten ausrichten:
    /// der aktuelle Layer, sonst die Karte selbst.
    pub fn grid_props(&self) -> LayerProps {
        self.current_layer
            .map(|layer| layer.props)
            .unwrap_or_else(|| self.map.full_layer_props())
    }
}

fn scale_length(pixels: u32, zoom: f64) -> i32 {
    ((pixels as f64 * zoom) as i32).max(1)
}

/// Rechteckiger Ausschnitt von Tile-Koordinaten (Ende exklusiv).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    /// Erste Tile-Koordinate (inklusiv)
    pub start: IVec2,
    /// Letzte Tile-Koordinate (exklusiv)
    pub end: IVec2,
}

impl TileRange {
    /// Leerer Bereich.
    pub const EMPTY: TileRange = TileRange {
        start: IVec2::ZERO,
        end: IVec2::ZERO,
    };

    /// Gesamter Layer.
    pub fn full(props: &LayerProps) -> Self {
        Self {
            start: IVec2::ZERO,
            end: IVec2::new(props.width as i32, props.height as i32),
        }
    }

    /// Gibt `true` zurück wenn der Bereich keine Tiles enthält.
    pub fn is_empty(&self) -> bool {
        self.end.x <= self.start.x || self.end.y <= self.start.y
    }

    /// Anzahl der Tiles im Bereich.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.end.x - self.start.x) * (self.end.y - self.start.y)) as usize
        }
    }

    /// Liegt die Tile-Koordinate im Bereich?
    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= self.start.x && tile.y >= self.start.y && tile.x < self.end.x && tile.y < self.end.y
    }

    /// Iteriert zeilenweise (hinten nach vorne) über alle Tiles.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> {
        let (start, end) = (self.start, self.end);
        (start.y..end.y).flat_map(move |y| (start.x..end.x).map(move |x| IVec2::new(x, y)))
    }
}

/// Geometrie und Zeichenlogik einer Karten-Orientierung.
///
/// Pflicht sind nur die geschlossenen Formeln der Orientierung; alle
/// Zeichen-Methoden haben Default-Implementierungen, die ausschließlich auf
/// diesen Formeln aufbauen.
pub trait Projection: std::fmt::Debug {
    /// Orientierung, die diese Projektion umsetzt.
    fn orientation(&self) -> Orientation;

    /// Vorwärts-Transformation einer (auch gebrochenen) Tile-Position in den Screen.
    ///
    /// An ganzzahligen Positionen liefert sie den Anker der Zelle.
    /// `offset` ist der gezoomte Parallax-Versatz, `tile_size` die gezoomte Tile-Größe.
    fn project(&self, ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2;

    /// Rückwärts-Transformation: Tile, das den Screen-Punkt enthält.
    ///
    /// Abrundung zur umschließenden Zelle; obere und linke Kante gehören zur Zelle.
    fn locate_tile(&self, ctx: &ViewContext, offset: IVec2, tile_size: IVec2, screen: IVec2) -> IVec2;

    /// Umschließendes Rechteck einer Zelle relativ zu ihrem Anker: `(versatz, größe)`.
    fn cell_bounds(&self, tile_size: IVec2) -> (IVec2, IVec2);

    /// Geschlossener Umriss einer Zelle am Screen-Anker, um `border` Pixel vergrößert.
    fn grid_polygon(&self, tile_size: IVec2, anchor: IVec2, border: i32) -> Polygon;

    /// Inhaltsgröße der Karte in Screen-Pixeln (ohne Grid-Rand).
    fn preferred_size(&self, ctx: &ViewContext) -> IVec2;

    /// Schrittweite für zeilenweises Scrollen bei gegebener Tile-Größe.
    fn scroll_step(&self, tile_size: IVec2) -> IVec2;

    // ── Abgeleitete Transformationen ────────────────────────────────

    /// Screen-Anker eines Tiles (roh: Versatz und Tile-Größe explizit).
    fn tile_to_screen(
        &self,
        ctx: &ViewContext,
        offset: IVec2,
        tile_size: IVec2,
        tx: i32,
        ty: i32,
    ) -> IVec2 {
        let screen = self.project(ctx, offset, tile_size, DVec2::new(tx as f64, ty as f64));
        screen.floor().as_ivec2()
    }

    /// Tile unter einem Screen-Punkt, bezogen auf einen Layer (oder die Karte).
    fn screen_to_tile(&self, ctx: &ViewContext, layer: Option<&LayerProps>, screen: IVec2) -> IVec2 {
        let props = layer.copied().unwrap_or_else(|| ctx.map.full_layer_props());
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);
        self.locate_tile(ctx, offset, tile_size, screen)
    }

    /// Map-Pixel eines Objekts in Tile-Einheiten.
    fn object_tile_space(&self, props: &LayerProps, pixel: DVec2) -> DVec2 {
        DVec2::new(
            pixel.x / props.tile_width.max(1) as f64,
            pixel.y / props.tile_height.max(1) as f64,
        )
    }

    /// Zeilenweises Scroll-Inkrement entlang einer Achse.
    fn scroll_unit_increment(&self, ctx: &ViewContext, axis: ScrollAxis) -> i32 {
        let step = self.scroll_step(ctx.map_tile_size());
        match axis {
            ScrollAxis::Horizontal => step.x.max(1),
            ScrollAxis::Vertical => step.y.max(1),
        }
    }

    /// Lineare Vorwärts-Transformation ohne zellabhängige Versätze.
    ///
    /// Für Orientierungen mit affinem Gitter identisch mit [`Projection::project`].
    /// Objekt-Umrisse verwenden sie relativ zu ihrem Anker, damit Kanten über
    /// Zellgrenzen hinweg gerade bleiben.
    fn project_linear(&self, ctx: &ViewContext, offset: IVec2, tile_size: IVec2, tile: DVec2) -> DVec2 {
        self.project(ctx, offset, tile_size, tile)
    }

    /// Tiles eines Layers, deren Zellen den Clip schneiden können.
    ///
    /// Ermittelt die Tiles unter den vier Clip-Ecken, erweitert um eine
    /// Zelle Rand. `image_height` ist die ungezoomte Höhe des höchsten
    /// gezeichneten Bildes; ragt es über die Zelle hinaus, kommen Zeilen dazu.
    fn visible_tiles(
        &self,
        ctx: &ViewContext,
        props: &LayerProps,
        clip: ClipRect,
        image_height: u32,
    ) -> TileRange {
        if clip.is_empty() || props.width == 0 || props.height == 0 {
            return TileRange::EMPTY;
        }
        let tile_size = ctx.zoomed_tile_size(props);
        let offset = ctx.layer_offset(props);
        let corners = [
            IVec2::new(clip.x, clip.y),
            IVec2::new(clip.right() - 1, clip.y),
            IVec2::new(clip.x, clip.bottom() - 1),
            IVec2::new(clip.right() - 1, clip.bottom() - 1),
        ];
        let (mut min, mut max) = (IVec2::MAX, IVec2::MIN);
        for corner in corners {
            let tile = self.locate_tile(ctx, offset, tile_size, corner);
            min = min.min(tile);
            max = max.max(tile);
        }

        let image_height = scale_length(image_height, ctx.zoom);
        let overhang = ((image_height - tile_size.y).max(0) + tile_size.y - 1) / tile_size.y;

        let limit = IVec2::new(props.width as i32, props.height as i32);
        let start = (min - IVec2::ONE).max(IVec2::ZERO);
        let end = (max + IVec2::splat(2 + overhang)).min(limit);
        TileRange { start, end }
    }

    // ── Zeichnen ────────────────────────────────────────────────────

    /// Zeichnet die Tiles eines Tile-Layers (nur clip-schneidende).
    ///
    /// Tile-Bilder werden unten links an der Zelle ausgerichtet, höhere Bilder
    /// ragen nach oben heraus.
    fn paint_layer(&self, surface: &mut Surface, ctx: &ViewContext, props: &LayerProps, grid: &TileGrid) {
        let tile_size = ctx.zoomed_tile_size(props);
        let offset = ctx.layer_offset(props);
        let (delta, cell) = self.cell_bounds(tile_size);
        let image_height = grid.max_image_height().max(ctx.map.max_tile_image_height());

        for tile_pos in self.visible_tiles(ctx, props, surface.clip(), image_height).iter() {
            let Some(tile) = grid.tile_at(tile_pos.x, tile_pos.y) else {
                continue;
            };
            let Some(image) = tile.image.as_deref() else {
                continue;
            };
            let anchor = self.tile_to_screen(ctx, offset, tile_size, tile_pos.x, tile_pos.y);
            draw_tile_image(surface, image, anchor + delta, cell, ctx.zoom);
        }
    }

    /// Zeichnet die Umrisse aller Objekte einer Objekt-Gruppe.
    fn paint_object_group(
        &self,
        surface: &mut Surface,
        ctx: &ViewContext,
        props: &LayerProps,
        group: &ObjectGroup,
    ) {
        let tile_size = ctx.zoomed_tile_size(props);
        let offset = ctx.layer_offset(props);
        surface.set_color(group.color);

        for object in &group.objects {
            let corners = [
                object.position,
                object.position + IVec2::new(object.size.x, 0),
                object.position + object.size,
                object.position + IVec2::new(0, object.size.y),
            ];
            let anchor_tile = self.object_tile_space(props, object.position.as_dvec2());
            let anchor = self.project(ctx, offset, tile_size, anchor_tile);
            let linear_anchor = self.project_linear(ctx, offset, tile_size, anchor_tile);
            let points: Vec<IVec2> = corners
                .iter()
                .map(|corner| {
                    let tile = self.object_tile_space(props, corner.as_dvec2());
                    let linear = self.project_linear(ctx, offset, tile_size, tile);
                    (anchor + linear - linear_anchor).round().as_ivec2()
                })
                .collect();

            if object.size.x == 0 && object.size.y == 0 {
                let half = OBJECT_MARKER_SIZE / 2;
                let marker = Polygon::rect(
                    points[0].x - half,
                    points[0].y - half,
                    OBJECT_MARKER_SIZE,
                    OBJECT_MARKER_SIZE,
                );
                surface.fill_polygon(&marker);
            } else {
                surface.stroke_polygon(&Polygon::new(points));
            }
        }
    }

    /// Füllt die Zellen aller selektierten Tiles mit der Highlight-Farbe.
    fn paint_selection(
        &self,
        surface: &mut Surface,
        ctx: &ViewContext,
        props: &LayerProps,
        selection: &SelectionArea,
    ) {
        let tile_size = ctx.zoomed_tile_size(props);
        let offset = ctx.layer_offset(props);
        surface.set_color(selection.highlight);

        for tile in self.visible_tiles(ctx, props, surface.clip(), 0).iter() {
            if !selection.is_selected(tile.x, tile.y) {
                continue;
            }
            let anchor = self.tile_to_screen(ctx, offset, tile_size, tile.x, tile.y);
            surface.fill_polygon(&self.grid_polygon(tile_size, anchor, 0));
        }
    }

    /// Zeichnet das Grid des Referenz-Layers als Zellumrisse.
    fn paint_grid(&self, surface: &mut Surface, ctx: &ViewContext) {
        let props = ctx.grid_props();
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);

        for tile in self.visible_tiles(ctx, &props, surface.clip(), 0).iter() {
            let anchor = self.tile_to_screen(ctx, offset, tile_size, tile.x, tile.y);
            surface.stroke_polygon(&self.grid_polygon(tile_size, anchor, 0));
        }
    }

    /// Beschriftet jede sichtbare Zelle des Referenz-Layers mit "x,y".
    ///
    /// Labels, die nicht in die Zelle passen, entfallen.
    fn paint_coordinates(&self, surface: &mut Surface, ctx: &ViewContext) {
        let props = ctx.grid_props();
        let tile_size = ctx.zoomed_tile_size(&props);
        let offset = ctx.layer_offset(&props);
        let (delta, cell) = self.cell_bounds(tile_size);
        let scale = (cell.y / 24).clamp(1, 4) as u32;
        let label_height = tile_raster::text::text_height(scale) as i32;

        for tile in self.visible_tiles(ctx, &props, surface.clip(), 0).iter() {
            let label = format!("{},{}", tile.x, tile.y);
            let label_width = tile_raster::text::text_width(&label, scale) as i32;
            if label_width > cell.x || label_height > cell.y {
                continue;
            }
            let anchor = self.tile_to_screen(ctx, offset, tile_size, tile.x, tile.y);
            let center = anchor + delta + cell / 2;
            surface.draw_text(
                center.x - label_width / 2,
                center.y - label_height / 2,
                &label,
                scale,
            );
        }
    }

    /// Zeichnet das Property-Flag oben rechts in jede Zelle, deren Tile Properties trägt.
    fn paint_property_flags(
        &self,
        surface: &mut Surface,
        ctx: &ViewContext,
        props: &LayerProps,
        grid: &TileGrid,
        icon: &RgbaImage,
    ) {
        let tile_size = ctx.zoomed_tile_size(props);
        let offset = ctx.layer_offset(props);
        let (delta, cell) = self.cell_bounds(tile_size);
        let (icon_w, icon_h) = (icon.width() as i32, icon.height() as i32);

        for tile_pos in self.visible_tiles(ctx, props, surface.clip(), 0).iter() {
            let has_flag = grid
                .tile_at(tile_pos.x, tile_pos.y)
                .is_some_and(|tile| tile.has_properties());
            if !has_flag {
                continue;
            }
            let anchor = self.tile_to_screen(ctx, offset, tile_size, tile_pos.x, tile_pos.y);
            let top_right = anchor + delta + IVec2::new(cell.x, 0);
            surface.draw_image(icon, top_right.x - icon_w, top_right.y, icon_w, icon_h);
        }
    }
}

/// Zeichnet ein Tile-Bild gezoomt, unten links an der Zelle (`cell_origin`, `cell`) ausgerichtet.
pub(crate) fn draw_tile_image(
    surface: &mut Surface,
    image: &RgbaImage,
    cell_origin: IVec2,
    cell: IVec2,
    zoom: f64,
) {
    let width = scale_length(image.width(), zoom);
    let height = scale_length(image.height(), zoom);
    surface.draw_image(image, cell_origin.x, cell_origin.y + cell.y - height, width, height);
}

/// Zeichnet ein Grid aus durchgehenden Gitterlinien für Projektionen, deren
/// Zellen ein affines Gitter bilden (Eckpunkte sind die Anker der Nachbarzellen).
pub(crate) fn paint_lattice_lines(projection: &dyn Projection, surface: &mut Surface, ctx: &ViewContext) {
    let props = ctx.grid_props();
    let range = projection.visible_tiles(ctx, &props, surface.clip(), 0);
    if range.is_empty() {
        return;
    }
    let tile_size = ctx.zoomed_tile_size(&props);
    let offset = ctx.layer_offset(&props);
    let anchor = |tx: i32, ty: i32| projection.tile_to_screen(ctx, offset, tile_size, tx, ty);

    for tx in range.start.x..=range.end.x {
        surface.draw_line(anchor(tx, range.start.y), anchor(tx, range.end.y));
    }
    for ty in range.start.y..=range.end.y {
        surface.draw_line(anchor(range.start.x, ty), anchor(range.end.x, ty));
    }
}

/// Erstellt die Projektion zu einer Orientierung.
pub fn projection_for(orientation: Orientation) -> Box<dyn Projection> {
    match orientation {
        Orientation::Orthogonal => Box::new(OrthoProjection),
        Orientation::Isometric => Box::new(IsoProjection),
        Orientation::Hexagonal => Box::new(HexProjection),
        Orientation::Shifted => Box::new(ShiftedProjection),
    }
}

#[cfg(test)]
mod tests;
