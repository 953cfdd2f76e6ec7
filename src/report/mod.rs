pub mod plot_txt;
