#![no_std]

/// Checks for a win in a grid-based game (Tic-Tac-Toe and other N-in-a-row variants)
///
/// # Arguments
/// * `board` - The board data as a flat, row-major slice
/// * `width` - Board width
/// * `height` - Board height
/// * `player` - The cell value to look for
/// * `line_size` - Number of consecutive cells needed to win
pub fn check_line_win<T: PartialEq>(
    board: &[T],
    width: usize,
    height: usize,
    player: &T,
    line_size: usize,
) -> bool {
    if line_size == 0 || board.len() < width * height {
        return false;
    }

    // (dx, dy) for horizontal, vertical, diagonal and anti-diagonal runs
    const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

    for y in 0..height {
        for x in 0..width {
            for &(dx, dy) in DIRECTIONS.iter() {
                if run_matches(board, width, height, x, y, dx, dy, player, line_size) {
                    return true;
                }
            }
        }
    }

    false
}

#[allow(clippy::too_many_arguments)]
fn run_matches<T: PartialEq>(
    board: &[T],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
    player: &T,
    line_size: usize,
) -> bool {
    // Reject runs that would leave the board before walking them
    let last = line_size as isize - 1;
    let end_x = x as isize + dx * last;
    let end_y = y as isize + dy * last;
    if end_x < 0 || end_y < 0 || end_x >= width as isize || end_y >= height as isize {
        return false;
    }

    (0..line_size as isize).all(|k| {
        let cx = (x as isize + dx * k) as usize;
        let cy = (y as isize + dy * k) as usize;
        board[cy * width + cx] == *player
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rows_columns_and_diagonals() {
        let row = [1, 1, 1, 0, 2, 0, 0, 0, 2];
        assert!(check_line_win(&row, 3, 3, &1, 3));
        assert!(!check_line_win(&row, 3, 3, &2, 3));

        let column = [2, 1, 0, 2, 1, 0, 2, 0, 0];
        assert!(check_line_win(&column, 3, 3, &2, 3));

        let anti = [0, 0, 1, 0, 1, 2, 1, 2, 0];
        assert!(check_line_win(&anti, 3, 3, &1, 3));
    }

    #[test]
    fn longer_lines_on_wider_boards() {
        let board = [
            0, 0, 0, 0, //
            1, 1, 1, 1, //
            0, 0, 0, 0, //
        ];
        assert!(check_line_win(&board, 4, 3, &1, 4));
        assert!(!check_line_win(&board, 4, 3, &1, 5));
    }

    #[test]
    fn short_board_never_wins() {
        let board = [1, 1];
        assert!(!check_line_win(&board, 3, 3, &1, 3));
    }
}
