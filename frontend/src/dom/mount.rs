use anyhow::{anyhow, Result};
use web_sys::{Document, Element};

use super::selectors;
use crate::services::chrome::js_error;

/// Insert the widget container above the host's pay period summary.
///
/// Falls back to the approval summary when the divider is missing; fails when
/// neither anchor exists.
pub fn create_mount_point(document: &Document) -> Result<Element> {
    let anchor = [selectors::SUMMARY_DIVIDER, selectors::APPROVAL_SUMMARY]
        .iter()
        .find_map(|selector| document.query_selector(selector).ok().flatten())
        .ok_or_else(|| anyhow!("no summary anchor found to mount the balance widget"))?;
    let parent = anchor
        .parent_node()
        .ok_or_else(|| anyhow!("summary anchor is detached from the page"))?;

    let root = document
        .create_element("div")
        .map_err(|e| js_error("could not create widget container", e))?;
    root.set_id(selectors::WIDGET_ROOT_ID);
    parent
        .insert_before(&root, Some(anchor.as_ref()))
        .map_err(|e| js_error("could not insert widget container", e))?;
    Ok(root)
}
