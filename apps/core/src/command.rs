use crate::links::LinkKind;
use crate::model::SortOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Backspace,
    ClearInput,
    Submit,
    MoveUp,
    MoveDown,
    PickSuggestion(usize),
    PickHistory(usize),
    FocusInput,
    ToggleHistory,
    CycleSort,
    SetSort(SortOrder),
    RequestRemoveHistory,
    ConfirmRemove,
    CancelRemove,
    OpenAll,
    OpenLink(LinkKind),
    ClickAt(u16, u16),
    Escape,
    Resize(u16, u16),
    Tick,
    Quit,
    None,
}
