use std::{fs::File, io::Write, path::PathBuf};

use log::{debug, error, info};
use svg::Document;

use crate::{export, graph::Graph, render::SvgRenderer};

/// Writes drawn graphs to an SVG file.
pub struct Svg {
    file_name: PathBuf,
    renderer: SvgRenderer,
}

impl Svg {
    pub fn new(file_name: impl Into<PathBuf>, renderer: SvgRenderer) -> Self {
        Self {
            file_name: file_name.into(),
            renderer,
        }
    }

    /// Writes an SVG document to the target file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        let file_name = self.file_name.display();
        info!(file_name:% = file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name:% = file_name, err:% = err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name:% = file_name, err:% = err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_graph<N, E>(&mut self, graph: &Graph<N, E>) -> Result<(), export::Error> {
        let doc = self.renderer.draw(graph);
        debug!(nodes = graph.node_count(); "SVG document rendered");

        self.write_document(&doc)
    }
}
