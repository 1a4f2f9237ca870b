use std::cell::Cell;
use std::rc::{Rc, Weak};

use gridkit::{
    Event, EventKind, Grid, Key, MouseButton, Node, Propagation, Sticky, TextWrap, Toolkit,
};
use listframe::prelude::*;

/// A manual test button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InsertStart,
    InsertEnd,
    DeleteStart,
    DeleteEnd,
    InsertMany,
    DeleteMany,
    GetStart,
    GetEnd,
    GetActive,
    GetAll,
    ActivateStart,
    ActivateEnd,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::InsertStart,
        Action::InsertEnd,
        Action::DeleteStart,
        Action::DeleteEnd,
        Action::InsertMany,
        Action::DeleteMany,
        Action::GetStart,
        Action::GetEnd,
        Action::GetActive,
        Action::GetAll,
        Action::ActivateStart,
        Action::ActivateEnd,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::InsertStart => "Insert Start",
            Action::InsertEnd => "Insert End",
            Action::DeleteStart => "Delete Start",
            Action::DeleteEnd => "Delete End",
            Action::InsertMany => "Insert Many",
            Action::DeleteMany => "Delete Many",
            Action::GetStart => "Get Start",
            Action::GetEnd => "Get End",
            Action::GetActive => "Get Active",
            Action::GetAll => "Get All",
            Action::ActivateStart => "Activate Start",
            Action::ActivateEnd => "Activate End",
        }
    }

    pub fn key(self) -> char {
        match self {
            Action::InsertStart => 'i',
            Action::InsertEnd => 'I',
            Action::DeleteStart => 'd',
            Action::DeleteEnd => 'D',
            Action::InsertMany => 'm',
            Action::DeleteMany => 'M',
            Action::GetStart => 'g',
            Action::GetEnd => 'G',
            Action::GetActive => 'a',
            Action::GetAll => 'A',
            Action::ActivateStart => 'f',
            Action::ActivateEnd => 'l',
        }
    }

    pub fn from_key(key: char) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.key() == key)
    }

    /// Start/End pairs share a row, start on the left.
    fn cell(self) -> (usize, usize) {
        let n = self as usize;
        (n % 2, n / 2)
    }
}

/// The demo window: a listbox on top, test buttons below it and an output
/// panel at the bottom.
pub struct Demo {
    state: Rc<DemoState>,
}

struct DemoState {
    listbox: Listbox<ListboxItem>,
    output: ResizableText,
    inserts: Cell<usize>,
    quit: Cell<bool>,
}

impl Demo {
    pub fn build(toolkit: &Toolkit) -> Self {
        let root = toolkit.root();
        root.columnconfigure(0, 1);
        root.rowconfigure(0, 1);
        root.rowconfigure(1, 0);
        root.rowconfigure(2, 0);

        let listbox = Listbox::new(root);
        listbox.grid(Grid::at(0, 0).sticky(Sticky::NSEW));

        let test_area = Node::frame(root);
        test_area.set_background("dark gray");
        test_area.columnconfigure(0, 1);
        test_area.columnconfigure(1, 1);
        test_area.grid(Grid::at(0, 1).sticky(Sticky::EW));

        let output = ResizableText::with_config(root, TextConfig::new().wrap(TextWrap::Word));
        output.grid(Grid::at(0, 2).sticky(Sticky::EW));
        output.bind_configure();
        output.set_text("Click a button or press its key. q quits.");

        listbox.on_select(|index| log::info!("selection changed to {index}"));

        let state = Rc::new(DemoState {
            listbox,
            output,
            inserts: Cell::new(0),
            quit: Cell::new(false),
        });

        for action in Action::ALL {
            add_button(&test_area, action, Rc::downgrade(&state));
        }
        bind_keys(root, Rc::downgrade(&state));

        Self { state }
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit.get()
    }

    pub fn perform(&self, action: Action) {
        self.state.perform(action);
    }
}

fn add_button(parent: &Node, action: Action, state: Weak<DemoState>) {
    let button = Node::label(parent, format!("{} [{}]", action.label(), action.key()));
    button.set_background("gray");
    button.set_padding(1, 0);
    let (column, row) = action.cell();
    button.grid(Grid::at(column, row).pady(1, 0));

    button.bind(EventKind::Button, move |event| {
        if let (Event::Button { button: MouseButton::Left, .. }, Some(state)) = (event, state.upgrade()) {
            state.perform(action);
            return Propagation::Break;
        }
        Propagation::Continue
    });
}

fn bind_keys(root: &Node, state: Weak<DemoState>) {
    root.bind_all(EventKind::Key, move |event| {
        let (Event::Key { key, .. }, Some(state)) = (event, state.upgrade()) else {
            return Propagation::Continue;
        };
        match key {
            Key::Char('q') | Key::Escape => state.quit.set(true),
            Key::Char(c) => match Action::from_key(*c) {
                Some(action) => state.perform(action),
                None => return Propagation::Continue,
            },
            _ => return Propagation::Continue,
        }
        Propagation::Break
    });
}

impl DemoState {
    fn perform(&self, action: Action) {
        log::info!("{}", action.label());
        let listbox = &self.listbox;
        match action {
            Action::InsertStart => listbox.insert(0, self.new_items(1)),
            Action::InsertEnd => listbox.insert(Index::End, self.new_items(1)),
            Action::DeleteStart => listbox.delete(0),
            Action::DeleteEnd => listbox.delete(Index::End),
            Action::InsertMany => listbox.insert(1, self.new_items(3)),
            Action::DeleteMany => listbox.delete_range(1, 3),
            Action::GetStart => self.report("get(0)", describe(listbox.get(0))),
            Action::GetEnd => self.report("get(end)", describe(listbox.get(Index::End))),
            Action::GetActive => self.report("get(active)", describe(listbox.get(Index::Active))),
            Action::GetAll => self.report(
                "get(0, end)",
                describe_all(&listbox.get_range(0, Index::End)),
            ),
            Action::ActivateStart => listbox.activate(0),
            Action::ActivateEnd => listbox.activate(Index::End),
        }
    }

    fn new_items(&self, count: usize) -> Vec<ListboxItem> {
        (0..count)
            .map(|_| {
                let n = self.inserts.get();
                self.inserts.set(n + 1);
                let item = ListboxItem::new(self.listbox.content(), format!("Insert {n}"));
                item.grid(Grid::at(0, 0).padx(1, 1).sticky(Sticky::EW));
                item
            })
            .collect()
    }

    fn report(&self, call: &str, result: String) {
        self.output.set_text(format!("{call} -> {result}"));
    }
}

fn describe(item: Option<ListboxItem>) -> String {
    item.map_or_else(|| "None".to_string(), |item| item.text())
}

fn describe_all(items: &[ListboxItem]) -> String {
    let texts: Vec<String> = items.iter().map(ListboxItem::text).collect();
    format!("({})", texts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit::{Input, Modifiers};

    fn demo() -> (Toolkit, Demo) {
        let toolkit = Toolkit::new(40, 30);
        let demo = Demo::build(&toolkit);
        toolkit.update();
        (toolkit, demo)
    }

    fn output(demo: &Demo) -> String {
        demo.state.output.text()
    }

    #[test]
    fn test_insert_start_prepends() {
        let (_tk, demo) = demo();
        demo.perform(Action::InsertStart);
        demo.perform(Action::InsertStart);
        demo.perform(Action::GetAll);

        assert_eq!(output(&demo), "get(0, end) -> (Insert 1, Insert 0)");
    }

    #[test]
    fn test_insert_many_goes_after_first() {
        let (_tk, demo) = demo();
        demo.perform(Action::InsertEnd);
        demo.perform(Action::InsertEnd);
        demo.perform(Action::InsertMany);
        demo.perform(Action::GetAll);

        assert_eq!(
            output(&demo),
            "get(0, end) -> (Insert 0, Insert 2, Insert 3, Insert 4, Insert 1)"
        );
    }

    #[test]
    fn test_delete_many_removes_middle() {
        let (_tk, demo) = demo();
        for _ in 0..5 {
            demo.perform(Action::InsertEnd);
        }
        demo.perform(Action::DeleteMany);
        demo.perform(Action::GetAll);

        assert_eq!(output(&demo), "get(0, end) -> (Insert 0, Insert 4)");
    }

    #[test]
    fn test_get_active_without_selection() {
        let (_tk, demo) = demo();
        demo.perform(Action::InsertEnd);
        demo.perform(Action::GetActive);
        assert_eq!(output(&demo), "get(active) -> None");

        demo.perform(Action::ActivateEnd);
        demo.perform(Action::GetActive);
        assert_eq!(output(&demo), "get(active) -> Insert 0");
    }

    #[test]
    fn test_keys_trigger_actions_and_quit() {
        let (tk, demo) = demo();
        let press = |c| {
            tk.dispatch(Input::Key {
                key: Key::Char(c),
                modifiers: Modifiers::default(),
            })
        };

        press('I');
        assert_eq!(demo.state.listbox.size(), 1);

        press('q');
        assert!(demo.should_quit());
    }

    #[test]
    fn test_button_cells_are_unique() {
        let mut cells: Vec<_> = Action::ALL.iter().map(|a| a.cell()).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), Action::ALL.len());
        assert_eq!(Action::from_key('M'), Some(Action::DeleteMany));
    }
}
