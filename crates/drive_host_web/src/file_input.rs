//! Reading files picked through an `<input type="file">` element.

#[derive(Debug, Clone, PartialEq, Eq)]
/// File contents and metadata taken from a file picker.
pub struct SelectedFile {
    /// File name as reported by the browser, without any directory part.
    pub name: String,
    /// MIME type reported by the browser, when known.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Reads the first file selected in the input element with DOM id `input_id`.
///
/// Returns `Ok(None)` when nothing is selected. The input is reset afterwards so picking the same
/// file again fires another change event.
///
/// # Errors
///
/// Returns an error when the element is missing or the file bytes cannot be read.
pub async fn read_selected_file(input_id: &str) -> Result<Option<SelectedFile>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(input_id))
            .ok_or_else(|| format!("file input `{input_id}` not found"))?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|_| format!("element `{input_id}` is not an input"))?;
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return Ok(None);
        };
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|err| format!("reading `{}` failed: {err:?}", file.name()))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        let content_type = Some(file.type_()).filter(|value| !value.is_empty());
        input.set_value("");
        return Ok(Some(SelectedFile {
            name: file.name(),
            content_type,
            bytes,
        }));
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = input_id;
        Ok(None)
    }
}
