use crate::map::{MapView, Marker};
use crate::types::Coords;
use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::path::Path;

/// A map that collects markers and writes them out as GPX waypoints.
#[derive(Debug, Default)]
pub struct GpxMap {
    center: Option<(Coords, u8)>,
    waypoints: Vec<(String, Marker)>,
}

impl GpxMap {
    pub const fn center(&self) -> Option<(Coords, u8)> {
        self.center
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn to_gpx(&self) -> Result<Vec<u8>> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::Start(BytesStart::new("gpx").with_attributes([
            ("version", "1.1"),
            ("creator", "mapty"),
            ("xmlns", "http://www.topografix.com/GPX/1/1"),
        ])))?;

        for (id, m) in &self.waypoints {
            let lat = m.coords.lat.to_string();
            let lon = m.coords.lng.to_string();
            let mut wpt = BytesStart::new("wpt");
            wpt.push_attribute(("lat", lat.as_str()));
            wpt.push_attribute(("lon", lon.as_str()));

            xml.write_event(Event::Start(wpt))?;
            write_text_element(&mut xml, "name", &m.label)?;
            write_text_element(&mut xml, "desc", id)?;
            write_text_element(&mut xml, "type", &m.class)?;
            xml.write_event(Event::End(BytesEnd::new("wpt")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("gpx")))?;
        Ok(xml.into_inner())
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_gpx()?;
        fs::write(path, &bytes).with_context(|| format!("writing GPX: {}", path.display()))?;
        tracing::info!(path = %path.display(), waypoints = self.waypoints.len(), "GPX written");
        Ok(())
    }
}

fn write_text_element(xml: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(tag)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

impl MapView for GpxMap {
    fn set_view(&mut self, center: Coords, zoom: u8) {
        self.center = Some((center, zoom));
    }

    fn fly_to(&mut self, center: Coords, zoom: u8) {
        self.center = Some((center, zoom));
    }

    fn add_marker(&mut self, id: &str, marker: Marker) {
        self.waypoints.push((id.to_string(), marker));
    }

    fn remove_marker(&mut self, id: &str) -> bool {
        let before = self.waypoints.len();
        self.waypoints.retain(|(w, _)| w != id);
        before != self.waypoints.len()
    }
}
