//! HTML generation on top of `quick-xml`'s writer API.
//!
//! Text and attribute values go through quick-xml's escaping, so nothing
//! taken from a record can inject markup.

use std::io::Cursor;

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Result;

pub struct HtmlWriter {
  writer: Writer<Cursor<Vec<u8>>>,
}

impl Default for HtmlWriter {
  fn default() -> Self { Self::new() }
}

impl HtmlWriter {
  pub fn new() -> Self { Self { writer: Writer::new(Cursor::new(Vec::new())) } }

  /// `<!DOCTYPE html>`
  pub fn doctype(&mut self) -> Result<()> {
    self
      .writer
      .write_event(Event::DocType(BytesText::from_escaped("html")))?;
    Ok(())
  }

  pub fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(tag);
    for (k, v) in attrs {
      el.push_attribute((*k, *v));
    }
    self.writer.write_event(Event::Start(el))?;
    Ok(())
  }

  pub fn end(&mut self, tag: &str) -> Result<()> {
    self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
  }

  pub fn text(&mut self, text: &str) -> Result<()> {
    self.writer.write_event(Event::Text(BytesText::new(text)))?;
    Ok(())
  }

  /// `<tag attrs…>text</tag>`
  pub fn elem(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> Result<()> {
    self.start(tag, attrs)?;
    self.text(text)?;
    self.end(tag)
  }

  /// An element with no content, written as an explicit open/close pair.
  /// HTML only allows the self-closing form on void elements.
  pub fn blank(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    self.start(tag, attrs)?;
    self.end(tag)
  }

  /// A void element such as `<meta>` or `<link>`.
  pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(tag);
    for (k, v) in attrs {
      el.push_attribute((*k, *v));
    }
    self.writer.write_event(Event::Empty(el))?;
    Ok(())
  }

  pub fn finish(self) -> String {
    let bytes = self.writer.into_inner().into_inner();
    // Only `&str` input is ever written.
    String::from_utf8_lossy(&bytes).into_owned()
  }
}
