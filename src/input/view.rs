//! View rendering for the text input.

use super::TextInput;

impl TextInput {
    /// Renders the prompt and the visible part of the buffer, padded to the
    /// input's width.
    pub fn view(&self) -> String {
        let width = self.width();
        let prompt = self.styles.prompt.render(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            let text: String = self.placeholder.chars().take(width).collect();
            let pad = width.saturating_sub(text.chars().count());
            return format!(
                "{prompt}{}{}",
                self.styles.placeholder.render(&text),
                " ".repeat(pad)
            );
        }

        let end = self.offset_right.min(self.value.len());
        let pos = self.pos.clamp(self.offset, end.max(self.offset));
        let before: String = self.value[self.offset..pos].iter().collect();
        let mut v = self.styles.text.render(&before);
        let mut shown = pos - self.offset;

        let under = self.value.get(pos).copied();
        let after_start = if under.is_some() { pos + 1 } else { pos };
        if self.focus {
            let c = under.unwrap_or(' ');
            v.push_str(&self.styles.cursor.render(&c.to_string()));
            shown += 1;
        } else if let Some(c) = under {
            v.push_str(&self.styles.text.render(&c.to_string()));
            shown += 1;
        }
        if after_start < end {
            let after: String = self.value[after_start..end].iter().collect();
            shown += end - after_start;
            v.push_str(&self.styles.text.render(&after));
        }
        if shown < width {
            v.push_str(&" ".repeat(width - shown));
        }
        format!("{prompt}{v}")
    }
}
