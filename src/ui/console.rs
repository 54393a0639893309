use indicatif::{ProgressBar, ProgressStyle};

use super::{Phase, Ui};

const BAR_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {pos}/{len}";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {pos}";

/// Terminal reporter drawing one indicatif bar at a time.
///
/// A total of zero switches the bar to a spinner; counts are still shown.
#[derive(Default)]
pub struct ConsoleUi {
    bar: Option<ProgressBar>,
    last_total: u64,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bar, replaced when switching between known and unknown totals
    fn bar_for(&mut self, total: u64) -> &ProgressBar {
        let switch = (total == 0) != (self.last_total == 0);
        if switch {
            if let Some(old) = self.bar.take() {
                old.finish_and_clear();
            }
        }
        self.bar.get_or_insert_with(|| new_bar(total))
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }
}

fn new_bar(total: u64) -> ProgressBar {
    if total == 0 {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            bar.set_style(style);
        }
        bar
    } else {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.clear_progress();
        self.println(format!("==> {}", phase));
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let label: String = label.into();
        let bar = self.bar_for(total);
        if total > 0 {
            bar.set_length(total);
        }
        bar.set_position(current);
        bar.set_message(label);
        self.last_total = total;
    }

    fn clear_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.last_total = 0;
    }

    fn log(&mut self, message: impl Into<String>) {
        self.println(format!("    {}", message.into()));
    }
}
