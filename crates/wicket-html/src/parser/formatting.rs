//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//! and [§ 13.2.6.4.7 the adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm).

use wicket_dom::{Namespace, NodeId};

use super::HTMLParser;
use super::scope::is_special;
use crate::error::ParseErrorCode;
use crate::tokenizer::{Tag, Token};

/// An entry in the list of active formatting elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFormattingElement {
    /// A formatting element together with "the token for which it was created".
    Element {
        /// The element in the arena.
        node_id: NodeId,
        /// The start tag that created it, kept so it can be recreated.
        tag: Tag,
    },
    /// "Markers are inserted when entering applet, object, marquee,
    /// template, td, th, and caption elements"
    Marker,
}

impl ActiveFormattingElement {
    /// The element, or `None` for a marker.
    #[must_use]
    pub const fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Element { node_id, .. } => Some(*node_id),
            Self::Marker => None,
        }
    }
}

/// Where the adoption agency will put the new formatting element back into
/// the list once the inner loop has moved things around.
#[derive(Debug, Clone, Copy)]
enum Bookmark {
    /// Replace the formatting element's own entry.
    Replace,
    /// Insert just after the entry for this node.
    InsertAfter(NodeId),
}

/// Whether two tags carry the same attributes, compared as sets.
fn same_attributes(a: &Tag, b: &Tag) -> bool {
    a.attributes.len() == b.attributes.len()
        && a.attributes
            .iter()
            .all(|attr| b.attr(&attr.name) == Some(attr.value.as_str()))
}

impl HTMLParser<'_> {
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_active_formatting_element(&mut self, node_id: NodeId, tag: &Tag) {
        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list."
        let after_marker = self
            .active_formatting_elements
            .iter()
            .rposition(|entry| matches!(entry, ActiveFormattingElement::Marker))
            .map_or(0, |index| index + 1);

        let matching: Vec<usize> = self.active_formatting_elements[after_marker..]
            .iter()
            .enumerate()
            .filter_map(|(offset, entry)| match entry {
                ActiveFormattingElement::Element { tag: existing, .. }
                    if existing.name == tag.name && same_attributes(existing, tag) =>
                {
                    Some(after_marker + offset)
                }
                _ => None,
            })
            .collect();
        if matching.len() >= 3 {
            let _ = self.active_formatting_elements.remove(matching[0]);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                tag: tag.clone(),
            });
    }

    /// Insert a marker at the end of the list.
    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "Remove entries until a marker has been removed or the list is empty."
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }

    /// Index of the entry for `node_id`, if it is in the list.
    pub(super) fn active_formatting_position(&self, node_id: NodeId) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .position(|entry| entry.node_id() == Some(node_id))
    }

    /// Drop the entry for `node_id`.
    pub(super) fn remove_active_formatting_element(&mut self, node_id: NodeId) {
        if let Some(index) = self.active_formatting_position(node_id) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    /// The last element named `local_name` between the end of the list and
    /// the last marker (or the start of the list).
    pub(super) fn active_formatting_element_named(&self, local_name: &str) -> Option<NodeId> {
        for entry in self.active_formatting_elements.iter().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { node_id, tag } if tag.name == local_name => {
                    return Some(*node_id);
                }
                ActiveFormattingElement::Element { .. } => {}
            }
        }
        None
    }

    fn is_open(&self, node_id: NodeId) -> bool {
        self.stack_of_open_elements.contains(&node_id)
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        let Some(last) = self.active_formatting_elements.last() else {
            return;
        };

        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there is
        //          nothing to reconstruct; stop this algorithm."
        match last.node_id() {
            None => return,
            Some(id) if self.is_open(id) => return,
            Some(_) => {}
        }

        // STEP 3-6 (Rewind): walk back to the entry just after the last marker
        // or open element.
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 {
            match self.active_formatting_elements[index - 1].node_id() {
                None => break,
                Some(id) if self.is_open(id) => break,
                Some(_) => index -= 1,
            }
        }

        // STEP 7-10 (Advance / Create): re-insert every entry from there on.
        for position in index..self.active_formatting_elements.len() {
            let ActiveFormattingElement::Element { tag, .. } =
                &self.active_formatting_elements[position]
            else {
                continue;
            };
            let tag = tag.clone();
            // STEP 8: "Create: Insert an HTML element for the token for which
            //          the element entry was created, to obtain new element."
            let new_element = self.insert_html_element(&tag);
            // STEP 9: "Replace the entry for entry in the list with an entry
            //          for new element."
            self.active_formatting_elements[position] = ActiveFormattingElement::Element {
                node_id: new_element,
                tag,
            };
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Runs for an end tag whose name is a formatting element (and for an
    /// `a` or `nobr` start tag that finds one already open). Returns `false`
    /// when the caller must fall back to "any other end tag".
    pub(super) fn run_adoption_agency(&mut self, token: &Token) -> bool {
        let Some(tag) = token.tag() else {
            return true;
        };
        // STEP 1: "Let subject be token's tag name."
        let subject = tag.name.as_str();

        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.tree.is_element(current, Namespace::Html, subject)
            && self.active_formatting_position(current).is_none()
        {
            let _ = self.pop_current_node();
            return true;
        }

        // STEP 3-4: "Let outerLoopCounter be 0. While true: If
        //            outerLoopCounter is greater than or equal to 8, then
        //            return. Increment outerLoopCounter by 1."
        for _ in 0..8 {
            // STEP 4.3: "Let formattingElement be the last element in the list
            //            of active formatting elements that: is between the end
            //            of the list and the last marker in the list, if any,
            //            or the start of the list otherwise, and has the tag
            //            name subject. If there is no such element, then return
            //            and instead act as described in the "any other end
            //            tag" entry above."
            let Some(formatting_element) = self.active_formatting_element_named(subject) else {
                return false;
            };

            // STEP 4.4: "If formattingElement is not in the stack of open
            //            elements, then this is a parse error; remove the
            //            element from the list, and return."
            let Some(formatting_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element)
            else {
                self.parse_error(ParseErrorCode::MisnestedFormattingElement, token);
                self.remove_active_formatting_element(formatting_element);
                return true;
            };

            // STEP 4.5: "If formattingElement is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.has_node_in_scope(formatting_element) {
                self.parse_error(ParseErrorCode::MisnestedFormattingElement, token);
                return true;
            }

            // STEP 4.6: "If formattingElement is not the current node, this is
            //            a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error(ParseErrorCode::MisnestedFormattingElement, token);
            }

            // STEP 4.7: "Let furthestBlock be the topmost node in the stack of
            //            open elements that is lower in the stack than
            //            formattingElement, and is an element in the special
            //            category. There might not be one."
            let furthest_block = self.stack_of_open_elements[formatting_index + 1..]
                .iter()
                .copied()
                .find(|&id| self.tree.as_element(id).is_some_and(is_special));

            // STEP 4.8: "If there is no furthestBlock, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formattingElement, then remove formattingElement from
            //            the list of active formatting elements, and finally
            //            return."
            let Some(furthest_block) = furthest_block else {
                self.pop_until_node(formatting_element);
                self.remove_active_formatting_element(formatting_element);
                return true;
            };

            // STEP 4.9: "Let commonAncestor be the element immediately above
            //            formattingElement in the stack of open elements."
            let common_ancestor = formatting_index
                .checked_sub(1)
                .map_or(NodeId::ROOT, |i| self.stack_of_open_elements[i]);

            // STEP 4.10: "Let a bookmark note the position of formattingElement
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let mut bookmark = Bookmark::Replace;

            // STEP 4.11: "Let node and lastNode be furthestBlock."
            let mut node_index = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
                .unwrap_or(formatting_index + 1);
            let mut last_node = furthest_block;

            // STEP 4.12-4.13: "Let innerLoopCounter be 0. While true:"
            let mut inner_loop_counter = 0;
            loop {
                // STEP 4.13.1: "Increment innerLoopCounter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //               in the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // STEP 4.13.3: "If node is formattingElement, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If innerLoopCounter is greater than 3 and node
                //               is in the list of active formatting elements,
                //               then remove node from the list of active
                //               formatting elements."
                if inner_loop_counter > 3 && self.active_formatting_position(node).is_some() {
                    self.remove_active_formatting_element(node);
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of
                //               open elements and continue."
                let Some(entry_index) = self.active_formatting_position(node) else {
                    self.remove_from_stack(node);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML namespace,
                //               with commonAncestor as the intended parent;
                //               replace the entry for node in the list of active
                //               formatting elements with an entry for the new
                //               element, replace the entry for node in the stack
                //               of open elements with an entry for the new
                //               element, and let node be the new element."
                let ActiveFormattingElement::Element { tag: node_tag, .. } =
                    self.active_formatting_elements[entry_index].clone()
                else {
                    break;
                };
                let new_element =
                    self.create_element_for_token(&node_tag, Namespace::Html, common_ancestor);
                self.active_formatting_elements[entry_index] = ActiveFormattingElement::Element {
                    node_id: new_element,
                    tag: node_tag,
                };
                self.stack_of_open_elements[node_index] = new_element;

                // STEP 4.13.7: "If lastNode is furthestBlock, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node == furthest_block {
                    bookmark = Bookmark::InsertAfter(new_element);
                }

                // STEP 4.13.8: "Append lastNode to node."
                self.tree.append_child(new_element, last_node);

                // STEP 4.13.9: "Set lastNode to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever lastNode ended up being in the
            //             appropriate place for inserting a node, but using
            //             commonAncestor as the override target."
            let location = self.appropriate_place_for_inserting(Some(common_ancestor));
            self.insert_at(location, last_node);

            // STEP 4.15: "Create an element for the token for which
            //             formattingElement was created, in the HTML namespace,
            //             with furthestBlock as the intended parent."
            let Some(formatting_tag) = self
                .active_formatting_position(formatting_element)
                .and_then(|i| match &self.active_formatting_elements[i] {
                    ActiveFormattingElement::Element { tag, .. } => Some(tag.clone()),
                    ActiveFormattingElement::Marker => None,
                })
            else {
                return true;
            };
            let new_element =
                self.create_element_for_token(&formatting_tag, Namespace::Html, furthest_block);

            // STEP 4.16: "Take all of the child nodes of furthestBlock and
            //             append them to the element created in the last step."
            self.tree.move_children(furthest_block, new_element);

            // STEP 4.17: "Append that new element to furthestBlock."
            self.tree.append_child(furthest_block, new_element);

            // STEP 4.18: "Remove formattingElement from the list of active
            //             formatting elements, and insert the new element into
            //             the list of active formatting elements at the
            //             position of the aforementioned bookmark."
            let new_entry = ActiveFormattingElement::Element {
                node_id: new_element,
                tag: formatting_tag,
            };
            match bookmark {
                Bookmark::Replace => {
                    if let Some(i) = self.active_formatting_position(formatting_element) {
                        self.active_formatting_elements[i] = new_entry;
                    }
                }
                Bookmark::InsertAfter(anchor) => {
                    self.remove_active_formatting_element(formatting_element);
                    let at = self
                        .active_formatting_position(anchor)
                        .map_or(self.active_formatting_elements.len(), |i| i + 1);
                    self.active_formatting_elements.insert(at, new_entry);
                }
            }

            // STEP 4.19: "Remove formattingElement from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of
            //             furthestBlock in that stack."
            self.remove_from_stack(formatting_element);
            if let Some(i) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
            {
                self.stack_of_open_elements.insert(i + 1, new_element);
                self.record_push();
            }
        }
        true
    }
}
